mod bot;
mod trim;

use crate::prelude::*;
use async_trait::async_trait;

pub use bot::*;
pub use trim::*;

#[async_trait]
pub(crate) trait Cmd {
    async fn run(self) -> Result;
}
