use chrono::Utc;
use sunphase::{decompose, Phase, SunPhaseEngine};

fn main() {
    let engine = SunPhaseEngine::new(42.94, -83.62);
    let now = Utc::now();

    let Some(report) = engine.calculate_utc(now) else {
        eprintln!("{now} is outside the 32-bit epoch range");
        return;
    };

    println!("UTC: {now}");
    println!("Phase: {}", report.phase);
    println!(
        "Next: {} in {} ({} s)",
        report.phase.next(),
        report.until_next(),
        report.seconds_until_next
    );

    let today = engine.schedule(i32::from(decompose(now.timestamp() as u32).day_of_year));
    for phase in Phase::ALL {
        match today.begins(phase) {
            Some(minute) => println!(
                "  {phase:<30} {:02}:{:02} UTC",
                minute / 60 % 24,
                minute % 60
            ),
            None => println!("  {phase:<30} --"),
        }
    }
}
