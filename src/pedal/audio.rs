use crate::pedal::data::EqBand;

/// Processing blocks of the audio chain.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EffectChannel {
    Compressor,
    Equalizer,
    Reverb,
    Tremolo,
    Flanger,
    Chorus,
    Delay,
    WahWah,
    LineIn,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DelayTap {
    First,
    Second,
}

impl DelayTap {
    pub const ALL: [DelayTap; 2] = [DelayTap::First, DelayTap::Second];
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParameterId {
    Enabled,
    // compressor
    MaxGain,
    Response,
    HardLimit,
    Threshold,
    Attack,
    Decay,
    // equalizer
    Band(EqBand),
    /// Center frequency of the band in Hz.
    BandFrequency(EqBand),
    // reverb
    RoomSize,
    Damping,
    // tremolo, flanger & chorus modulation
    Frequency,
    Amplitude,
    Speed,
    Depth,
    Voices,
    // delay
    Time(DelayTap),
    // wah-wah
    CenterFrequency,
    Gain,
    Octaves,
    // line in
    Level,
}

/// Gain stages of the audio chain.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MixerChannel {
    Reverb,
    Chorus,
    WahWah,
    Flanger,
    Tremolo,
    Delay,
    DelayFeedback,
    DelayOut(DelayTap),
}

impl MixerChannel {
    /// The mixer input this channel is wired to on the audio board.
    pub fn input(self) -> u8 {
        use MixerChannel::*;
        match self {
            Reverb => 0,
            Chorus => 1,
            WahWah => 2,
            Flanger => 3,
            Tremolo => 4,
            Delay => 5,
            DelayFeedback => 1,
            DelayOut(DelayTap::First) => 0,
            DelayOut(DelayTap::Second) => 1,
        }
    }
}

/// Receiver of the values computed for the audio chain.
pub trait AudioSink {
    fn set_parameter(&mut self, channel: EffectChannel, param: ParameterId, value: f32);

    /// Sets the gain of the mixer `channel`, from 0.0 to 1.0.
    fn set_gain(&mut self, channel: MixerChannel, level: f32);
}

/// Points where the signal level can be measured.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Probe {
    Input,
    Output,
}

pub trait LevelProbe {
    /// Returns the peak to peak amplitude measured since previous call, if any.
    fn peak_to_peak(&mut self, probe: Probe) -> Option<f32>;
}

/// An `AudioSink` which logs the values pushed to the audio chain.
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn set_parameter(&mut self, channel: EffectChannel, param: ParameterId, value: f32) {
        log::debug!("{channel:?} {param:?} = {value}");
    }

    fn set_gain(&mut self, channel: MixerChannel, level: f32) {
        log::debug!("{channel:?} (mixer input {}) gain = {level}", channel.input());
    }
}

impl LevelProbe for LogSink {
    fn peak_to_peak(&mut self, _probe: Probe) -> Option<f32> {
        None
    }
}

/// An `AudioSink` keeping track of the values pushed to the audio chain.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub params: Vec<(EffectChannel, ParameterId, f32)>,
    pub gains: Vec<(MixerChannel, f32)>,
    pub peaks: std::collections::VecDeque<(Probe, f32)>,
}

#[cfg(test)]
impl RecordingSink {
    /// Returns the last value pushed for `param` on `channel`.
    pub fn parameter(&self, channel: EffectChannel, param: ParameterId) -> Option<f32> {
        self.params
            .iter()
            .rev()
            .find(|(chan, id, _)| *chan == channel && *id == param)
            .map(|(_, _, value)| *value)
    }

    /// Returns the last gain set for `channel`.
    pub fn gain(&self, channel: MixerChannel) -> Option<f32> {
        self.gains
            .iter()
            .rev()
            .find(|(chan, _)| *chan == channel)
            .map(|(_, level)| *level)
    }

    pub fn clear(&mut self) {
        self.params.clear();
        self.gains.clear();
    }
}

#[cfg(test)]
impl AudioSink for RecordingSink {
    fn set_parameter(&mut self, channel: EffectChannel, param: ParameterId, value: f32) {
        self.params.push((channel, param, value));
    }

    fn set_gain(&mut self, channel: MixerChannel, level: f32) {
        self.gains.push((channel, level));
    }
}

#[cfg(test)]
impl LevelProbe for RecordingSink {
    fn peak_to_peak(&mut self, probe: Probe) -> Option<f32> {
        match self.peaks.front() {
            Some((next, _)) if *next == probe => self.peaks.pop_front().map(|(_, peak)| peak),
            _ => None,
        }
    }
}
