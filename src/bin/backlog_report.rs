use backlog_report::report::{init_logger, parse_cli, show_chart};
use backlog_report::{Dataset, ReportResult};
use log::{debug, info, warn};
use std::path::Path;

fn run(csvin: &Path, pngout: &Path) -> ReportResult<()> {
    let dataset = Dataset::from_csv(csvin)?;
    let sorted = dataset.sort();
    debug!("sorted data:\n{}", sorted);
    sorted.plot_png(pngout)
}

fn main() {
    let args = parse_cli();
    init_logger(args.verbose);
    if !args.ignored.is_empty() {
        warn!("ignoring extra arguments {:?}", args.ignored);
    }
    info!(
        "read data from {} and plot to {}",
        args.csvin.display(),
        args.pngout.display()
    );
    if let Err(e) = run(&args.csvin, &args.pngout) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
    if args.show {
        // the png is already on disk, a missing viewer only costs the preview
        if let Err(e) = show_chart(&args.pngout) {
            warn!("could not open {} in a viewer: {}", args.pngout.display(), e);
        }
    }
}
