use clap::Parser;
use miette::Result;
use invtrack::cli::commands::shell::ShellArgs;
use invtrack::cli::{Cli, Commands};
use invtrack::core::Config;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    let default_level = if cli.global.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = Config::load();
    let global = cli.global.resolve(&config);
    log::debug!("using inventory file {}", global.csv_path().display());

    match cli.command {
        None => invtrack::cli::commands::shell::run(ShellArgs { load: false }, &global),
        Some(Commands::Shell(args)) => invtrack::cli::commands::shell::run(args, &global),
        Some(Commands::List(args)) => invtrack::cli::commands::list::run(args, &global),
        Some(Commands::Stats(args)) => invtrack::cli::commands::stats::run(args, &global),
        Some(Commands::Import(args)) => invtrack::cli::commands::import::run(args, &global),
        Some(Commands::Template(args)) => invtrack::cli::commands::template::run(args),
        Some(Commands::Completions(args)) => invtrack::cli::commands::completions::run(args),
    }
}
