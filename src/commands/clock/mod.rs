use clap::Args;

use datekit::date::seconds_to_clock;

#[derive(Args, Clone, PartialEq, Eq)]
pub struct ClockArgs {
    /// Elapsed seconds to render as HH:mm:ss (values of a day or more wrap around)
    #[arg(allow_negative_numbers = true)]
    pub seconds: i64,
}

impl ClockArgs {
    pub fn run(&self) -> anyhow::Result<()> {
        if !(0..86_400).contains(&self.seconds) {
            tracing::warn!(seconds = self.seconds, "Seconds outside a single day wrap around");
        }
        println!("{}", seconds_to_clock(self.seconds));
        Ok(())
    }
}
