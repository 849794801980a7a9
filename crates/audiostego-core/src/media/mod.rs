mod buffer;
pub mod wav;

use std::path::Path;

pub(crate) use buffer::checked_sample;
pub use buffer::AudioBuffer;
pub use wav::{is_wav_file, load, store};

pub trait Persist {
    fn save_as(&self, _: &Path) -> crate::Result<()>;
}
