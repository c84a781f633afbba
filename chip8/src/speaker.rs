use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

const SAMPLE_RATE: i32 = 44_100;
const PITCH: f32 = 440.0;
const VOLUME: f32 = 0.2;

/// Something that can sound the Chip-8's single tone.
pub trait Speaker {
    /// Starts or stops the tone; repeated calls with the same value are no-ops.
    fn set_active(&mut self, active: bool);
}

struct SquareWave {
    phase_inc: f32,
    phase: f32,
    volume: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase < 0.5 {
                self.volume
            } else {
                -self.volume
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// A square wave played through the default SDL2 audio device.
pub struct Tone {
    device: AudioDevice<SquareWave>,
    active: bool,
}

impl Tone {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let audio = sdl.audio()?;
        let desired = AudioSpecDesired {
            freq: Some(SAMPLE_RATE),
            channels: Some(1),
            samples: None,
        };
        let device = audio.open_playback(None, &desired, |spec| SquareWave {
            phase_inc: PITCH / spec.freq as f32,
            phase: 0.0,
            volume: VOLUME,
        })?;
        Ok(Tone {
            device,
            active: false,
        })
    }
}

impl Speaker for Tone {
    fn set_active(&mut self, active: bool) {
        if active == self.active {
            return;
        }
        if active {
            self.device.resume();
        } else {
            self.device.pause();
        }
        self.active = active;
    }
}

/// A speaker that never makes a sound.
pub struct Mute;

impl Speaker for Mute {
    fn set_active(&mut self, _active: bool) {}
}
