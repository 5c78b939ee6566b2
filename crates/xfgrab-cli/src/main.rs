use std::fs::File;
use std::path::PathBuf;
use std::{env, io, process};

use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use tokio::runtime;
use xfgrab_scraper::{scrape_site, ByteSize, ScrapeConfig, UnitsError};

/// XenForo thread and category media scraper
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// URL to a single thread or a forum category
    #[arg(required_unless_present = "completion")]
    pub url: Option<String>,
    /// Cookie header value sent with every request
    #[arg(long, short)]
    pub cookie: Option<String>,
    /// Download output directory; must exist
    #[arg(long, short)]
    pub output: Option<PathBuf>,
    /// Largest file to download, as shorthand like 500MB
    #[arg(long, value_parser = parse_size)]
    pub max_size: Option<ByteSize>,
    /// Smallest file to download, as shorthand like 100KiB
    #[arg(long, value_parser = parse_size)]
    pub min_size: Option<ByteSize>,
    /// Skip files whose name contains this string; repeatable
    #[arg(long, short)]
    pub ignored: Vec<String>,
    /// Follow media hosted outside the forum
    #[arg(long, short)]
    pub external: bool,
    /// Do not create a directory per thread
    #[arg(long)]
    pub no_directories: bool,
    /// Skip threads that already have a directory
    #[arg(long)]
    pub skip_scraped: bool,
    /// Render each scraped page to PDF
    #[arg(long)]
    pub pdf: bool,
    /// Do not download embedded images
    #[arg(long)]
    pub no_images: bool,
    /// Do not download embedded videos
    #[arg(long)]
    pub no_videos: bool,
    /// Seconds to wait between file downloads
    #[arg(long)]
    pub throttle: Option<f32>,
    /// Optional default yaml configuration file
    #[arg(long, env = "XFGRAB_CONFIG")]
    pub config: Option<PathBuf>,
    /// Verbose logging
    #[arg(long, short)]
    pub verbose: bool,
    /// Generate bash completions and exit
    #[arg(long, hide = true)]
    pub completion: bool,
}

fn parse_size(text: &str) -> Result<ByteSize, UnitsError> {
    text.parse()
}

impl TryFrom<&Args> for ScrapeConfig {
    type Error = anyhow::Error;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        let mut conf = if let Some(file) = args.config.as_ref().map(File::open) {
            serde_yaml::from_reader(file?)?
        } else {
            ScrapeConfig::default()
        };
        if let Some(cookie) = &args.cookie {
            conf.cookie = Some(cookie.clone());
        }
        if let Some(output) = &args.output {
            conf.output = Some(output.clone());
        }
        if let Some(max_size) = args.max_size {
            conf.max_size = Some(max_size);
        }
        if let Some(min_size) = args.min_size {
            conf.min_size = Some(min_size);
        }
        if !args.ignored.is_empty() {
            conf.ignored = args.ignored.clone();
        }
        if args.external {
            conf.external = true;
        }
        if args.no_directories {
            conf.no_directories = true;
        }
        if args.skip_scraped {
            conf.skip_scraped = true;
        }
        if args.pdf {
            conf.render_pdf = true;
        }
        if args.no_images {
            conf.no_images = true;
        }
        if args.no_videos {
            conf.no_videos = true;
        }
        if let Some(throttle) = args.throttle {
            conf.throttle = Some(throttle);
        }
        Ok(conf)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.completion {
        generate(Shell::Bash, &mut Args::command(), "xfgrab", &mut io::stdout());
        return Ok(());
    }

    if env::var_os("RUST_LOG").is_none() {
        let level = if args.verbose { "debug" } else { "info" };
        env::set_var("RUST_LOG", format!("xfgrab={level},xfgrab_scraper={level}"));
    }
    env_logger::init();

    let conf: ScrapeConfig = (&args).try_into()?;
    let Some(url) = args.url.as_deref() else {
        anyhow::bail!("missing URL");
    };

    let rt = runtime::Builder::new_multi_thread().enable_all().build()?;
    let interrupted = rt.block_on(async {
        tokio::select! {
            res = scrape_site(&conf, url) => res.map(|()| false),
            _ = tokio::signal::ctrl_c() => Ok(true),
        }
    })?;

    if interrupted {
        println!("\nInterrupted, exiting.");
        process::exit(130);
    }
    println!("\nDone!");
    Ok(())
}
