use crate::cli::EvaluateArgs;
use crate::error::{CliError, Result};
use crate::io;
use crate::report;
use corewall::core::models::section::{SectionSchedule, WallSection};
use corewall::workflows::evaluate;
use tracing::info;

pub async fn run(args: EvaluateArgs) -> Result<()> {
    let section = section_from_args(&args)?;
    let profile = io::read_profile(&args.input)?;
    let schedule = SectionSchedule::uniform(section, profile.len());

    info!(
        length = args.length,
        thickness = args.thickness,
        ratio = args.ratio,
        drift_limit = %args.drift_limit,
        "Evaluating uniform section."
    );
    let result = evaluate::run(&profile, &schedule, args.drift_limit)?;

    println!(
        "Section {} ft x {} ft, rho = {:.4}, drift limit {}",
        args.length, args.thickness, args.ratio, args.drift_limit
    );
    println!();
    print!("{}", report::story_table(&schedule, &result.capacity));
    println!();
    print!(
        "{}",
        report::capacity_summary(&result.capacity, &result.quantities, &result.carbon)
    );

    Ok(())
}

fn section_from_args(args: &EvaluateArgs) -> Result<WallSection> {
    if args.length == 0 || args.thickness == 0 {
        return Err(CliError::Argument(
            "wall length and thickness must be at least 1 ft".to_string(),
        ));
    }
    let section = WallSection::new(args.length, args.thickness, args.ratio);
    if !section.is_hollow() {
        return Err(CliError::Argument(format!(
            "wall length {} ft must exceed twice the thickness ({} ft)",
            args.length,
            u64::from(args.thickness) * 2
        )));
    }
    if !(args.ratio.is_finite() && args.ratio > 0.0 && args.ratio <= 1.0) {
        return Err(CliError::Argument(format!(
            "reinforcement ratio must lie within (0, 1], got {}",
            args.ratio
        )));
    }
    Ok(section)
}
