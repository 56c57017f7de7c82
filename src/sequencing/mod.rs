pub mod scheduler;
pub mod tempo;
pub mod transport;

pub use scheduler::{visual_delay, BeatEvent, LookaheadScheduler, LOOKAHEAD, SCHEDULE_AHEAD};
pub use tempo::{parse_bpm_input, tempo_marking, TempoMarking};
pub use transport::Transport;
