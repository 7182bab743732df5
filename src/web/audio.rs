use log::warn;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

use crate::game::AudioCommand;

/// Plays the music track through an `<audio>` element; decoding is left to the browser.
pub struct MusicPlayer {
    current: Option<HtmlAudioElement>,
    muted: bool,
}

impl MusicPlayer {
    pub fn new(muted: bool) -> Self {
        Self {
            current: None,
            muted,
        }
    }

    pub fn apply(&mut self, command: &AudioCommand) {
        let result = match command {
            AudioCommand::PlayMusic {
                path,
                volume,
                looped,
            } => self.play(path, *volume, *looped),
            AudioCommand::StopMusic => {
                self.stop();
                Ok(())
            }
        };
        if let Err(err) = result {
            warn!("audio command {command:?} failed: {err:?}");
        }
    }

    fn play(&mut self, path: &str, volume: f32, looped: bool) -> Result<(), JsValue> {
        self.stop();
        if self.muted {
            return Ok(());
        }
        let audio = HtmlAudioElement::new_with_src(path)?;
        audio.set_loop(looped);
        audio.set_volume(volume as f64);
        let promise = audio.play()?;
        let path = path.to_owned();
        wasm_bindgen_futures::spawn_local(async move {
            // Autoplay policies reject the first play before any user gesture.
            if let Err(err) = JsFuture::from(promise).await {
                warn!("could not start {path}: {err:?}");
            }
        });
        self.current = Some(audio);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(audio) = self.current.take() {
            if let Err(err) = audio.pause() {
                warn!("could not pause music: {err:?}");
            }
            audio.set_current_time(0.0);
        }
    }
}
