use simon_core::power;
use simon_core::random::PatternRng;

use crate::board::HardwareBoard;
use crate::telemetry::LogTelemetry;

#[embassy_executor::task]
pub async fn run(mut board: HardwareBoard, mut telemetry: LogTelemetry) -> ! {
    defmt::info!("game: task started");
    power::run::<_, PatternRng, _>(&mut board, &mut telemetry)
}
