//! Stage: one controller plus the responders that read from it.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use super::{MusicResponder, Responder};
use crate::audio::{AudioTransport, FftAnalyzer};
use crate::music::{MusicController, MusicEvent, Song};
use crate::params::ShowConfig;

/// Owns the controller and forwards its notifications to every responder
///
/// Each tick runs the controller first (transport events, spectrum refresh)
/// and only then lets the responders query, so every responder sees the
/// spectra of the current frame.
pub struct Stage {
    controller: MusicController,
    responders: Rc<RefCell<Vec<Responder>>>,
}

impl Stage {
    pub fn new(mut controller: MusicController, responders: Vec<Responder>) -> Self {
        let responders = Rc::new(RefCell::new(responders));

        let on_start = Rc::clone(&responders);
        controller.subscribe(MusicEvent::TrackStarted, move |_, clock| {
            for responder in on_start.borrow_mut().iter_mut() {
                responder.on_track_start(clock);
            }
        });
        let on_end = Rc::clone(&responders);
        controller.subscribe(MusicEvent::TrackEnded, move |_, clock| {
            for responder in on_end.borrow_mut().iter_mut() {
                responder.on_track_end(clock);
            }
        });

        Self {
            controller,
            responders,
        }
    }

    /// Build the song, analyzer and responders described by a show file
    pub fn from_show(show: &ShowConfig, transport: Box<dyn AudioTransport>) -> Self {
        let song = Song::load(&show.song);
        let controller = MusicController::new(
            "Music Controller",
            song,
            show.controller.clone(),
            Box::new(FftAnalyzer::new(show.analyzer.clone())),
            transport,
        );
        let responders = show.responders.iter().map(Responder::from_config).collect();
        Self::new(controller, responders)
    }

    /// Initialize responders, then arm (and maybe start) the controller
    pub fn begin_play(&mut self) {
        for responder in self.responders.borrow_mut().iter_mut() {
            responder.on_initialize(&self.controller);
        }
        self.controller.begin_play();
    }

    /// Advance one frame: controller refresh phase, then responder queries
    pub fn tick(&mut self, delta_s: f32) {
        self.controller.tick(delta_s);
        for responder in self.responders.borrow_mut().iter_mut() {
            responder.on_tick(&self.controller, delta_s);
        }
    }

    pub fn controller(&self) -> &MusicController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut MusicController {
        &mut self.controller
    }

    pub fn responders(&self) -> Ref<'_, Vec<Responder>> {
        self.responders.borrow()
    }
}
