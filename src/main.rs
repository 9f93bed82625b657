//! wp-svn-update entry point.
//!
//! Parses the command line, runs the update workflow and prints errors with
//! their suggestions. Every run ends with `(exiting...)`; the exit code is 1 when
//! the run stopped on an error.

use wp_svn_update::cli;
use wp_svn_update::constants::EXIT_NOTICE;
use wp_svn_update::core::error::user_friendly_error;
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(_) => println!("{EXIT_NOTICE}"),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            println!("{EXIT_NOTICE}");
            std::process::exit(1);
        }
    }
}
