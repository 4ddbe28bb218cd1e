use crate::args::Args;
use indicatif::ProgressBar;

/// Progress bar for reading a mailbox. Its length is set once known.
pub fn create_progress_bar(args: &Args) -> ProgressBar {
    if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(0)
    }
}
