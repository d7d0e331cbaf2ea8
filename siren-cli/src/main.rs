use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use futures::TryStreamExt;
use siren_api::{AlbumInfo, ClientConfig, ListPackage, NewsInfo, SirenClient};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "siren",
    version,
    about = "Browse Monster Siren albums, songs and news"
)]
struct Cli {
    /// API root URL
    #[arg(long, env = "SIREN_BASE_URL", global = true)]
    base_url: Option<String>,
    /// Request timeout in seconds (0 disables)
    #[arg(long, env = "SIREN_TIMEOUT", global = true)]
    timeout: Option<u64>,
    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every album
    Albums,
    /// Show one album
    Album {
        /// Album cid
        cid: String,
        /// Include the track list
        #[arg(short, long)]
        detail: bool,
    },
    /// List every song
    Songs,
    /// Show song details
    Song {
        /// Song cid
        cid: String,
    },
    /// List news, newest first
    News {
        /// Continue after this news cid
        #[arg(long, value_name = "CID", conflicts_with = "all")]
        after: Option<String>,
        /// Follow pagination to the last page
        #[arg(long)]
        all: bool,
    },
    /// Show a news article
    NewsDetail {
        /// News cid
        cid: String,
    },
    /// List featured news
    Recommended,
    /// Search albums and news
    Search {
        /// Search keyword
        keyword: String,
        /// Only search one kind, with pagination
        #[arg(short = 't', long = "type")]
        kind: Option<SearchKind>,
        /// Continue after this cid (requires --type)
        #[arg(long, value_name = "CID", requires = "kind")]
        after: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SearchKind {
    Albums,
    News,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let client = build_client(cli.base_url.as_deref(), cli.timeout)?;

    match cli.command {
        Command::Albums => cmd_albums(&client).await,
        Command::Album { cid, detail } => cmd_album(&client, &cid, detail).await,
        Command::Songs => cmd_songs(&client).await,
        Command::Song { cid } => cmd_song(&client, &cid).await,
        Command::News { after, all } => cmd_news(&client, after.as_deref(), all).await,
        Command::NewsDetail { cid } => cmd_news_detail(&client, &cid).await,
        Command::Recommended => cmd_recommended(&client).await,
        Command::Search {
            keyword,
            kind,
            after,
        } => cmd_search(&client, &keyword, kind, after.as_deref()).await,
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "siren_api=debug,siren_cli=debug,warn"
    } else {
        "siren_api=info,siren_cli=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_client(base_url: Option<&str>, timeout: Option<u64>) -> Result<SirenClient> {
    let mut config = match base_url {
        Some(url) => ClientConfig::with_base_url(url).context("invalid --base-url")?,
        None => ClientConfig::default(),
    };
    if let Some(secs) = timeout {
        config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
    }
    tracing::debug!(base_url = %config.base_url, "using API root");
    SirenClient::with_config(config).context("failed to build HTTP client")
}

// ── albums ──

async fn cmd_albums(client: &SirenClient) -> Result<()> {
    let albums = client.albums().list_all().await?;
    for a in &albums {
        print_album(a);
    }
    println!("\n{} albums", albums.len());
    Ok(())
}

async fn cmd_album(client: &SirenClient, cid: &str, detail: bool) -> Result<()> {
    if !detail {
        let a = client.albums().summary(cid).await?;
        println!("Album:   {} (cid={})", a.name, a.cid);
        println!("Artists: {}", a.artistes.join(", "));
        println!("Belong:  {}", a.belong);
        println!("Cover:   {}", a.cover_url);
        if !a.intro.is_empty() {
            println!("\n{}", a.intro);
        }
        return Ok(());
    }

    let a = client.albums().detail(cid).await?;
    println!("Album: {} (cid={})", a.name, a.cid);
    println!("Cover: {}", a.cover_url);
    if !a.intro.is_empty() {
        println!("\n{}", a.intro);
    }
    println!();
    for (i, s) in a.songs.iter().enumerate() {
        println!("  {:>2}. [{}] {} - {}", i + 1, s.cid, s.artists.join(", "), s.name);
    }
    Ok(())
}

fn print_album(a: &AlbumInfo) {
    println!("  [{}] {} ({})", a.cid, a.name, a.artistes.join(", "));
}

// ── songs ──

async fn cmd_songs(client: &SirenClient) -> Result<()> {
    let songs = client.songs().list_all().await?;
    for s in &songs {
        println!("  [{}] {} - {} (album {})", s.cid, s.artists.join(", "), s.name, s.album_cid);
    }
    if let Some(cid) = &songs.autoplay_song_cid {
        println!("\nAutoplay: {cid}");
    }
    Ok(())
}

async fn cmd_song(client: &SirenClient, cid: &str) -> Result<()> {
    let s = client.songs().detail(cid).await?;
    println!("Song:    {} (cid={})", s.name, s.cid);
    println!("Artists: {}", s.artists.join(", "));
    println!("Album:   {}", s.album_cid);
    println!("Source:  {}", s.source_url);
    if !s.lyric_url.is_empty() {
        println!("Lyric:   {}", s.lyric_url);
    }
    if !s.mv_url.is_empty() {
        println!("MV:      {}", s.mv_url);
    }
    Ok(())
}

// ── news ──

async fn cmd_news(client: &SirenClient, after: Option<&str>, all: bool) -> Result<()> {
    if all {
        let mut pages = client.news().pages();
        while let Some(page) = pages.try_next().await? {
            for n in &page {
                print_news(n);
            }
        }
        return Ok(());
    }

    let page = client.news().list_all(after).await?;
    for n in &page {
        print_news(n);
    }
    print_more_hint(&page);
    Ok(())
}

async fn cmd_news_detail(client: &SirenClient, cid: &str) -> Result<()> {
    let n = client.news().detail(cid).await?;
    let category = n
        .known_category()
        .map_or_else(|| format!("cate {}", n.category), |c| c.label().to_owned());
    println!("Title:    {} (cid={})", n.title, n.cid);
    println!("Author:   {}", n.author);
    println!("Date:     {}", n.date);
    println!("Category: {category}");
    println!("\n{}", n.content);
    Ok(())
}

async fn cmd_recommended(client: &SirenClient) -> Result<()> {
    for n in client.news().recommended().await? {
        println!("  [{}] {} ({})", n.cid, n.title, n.date);
        if !n.cover.cover_url.is_empty() {
            println!("        {}", n.cover.cover_url);
        }
    }
    Ok(())
}

fn print_news(n: &NewsInfo) {
    let category = n
        .known_category()
        .map_or_else(|| format!("cate {}", n.category), |c| c.label().to_owned());
    println!("  [{}] {} ({}, {category})", n.cid, n.title, n.date);
}

fn print_more_hint<T: siren_api::Identified>(page: &ListPackage<T>) {
    if let Some(cursor) = page.next_cursor() {
        println!("\n-- more: --after {cursor}");
    }
}

// ── search ──

async fn cmd_search(
    client: &SirenClient,
    keyword: &str,
    kind: Option<SearchKind>,
    after: Option<&str>,
) -> Result<()> {
    let search = client.search();
    match kind {
        Some(SearchKind::Albums) => {
            let page = search.albums(keyword, after).await?;
            for a in &page {
                print_album(a);
            }
            print_more_hint(&page);
        }
        Some(SearchKind::News) => {
            let page = search.news(keyword, after).await?;
            for n in &page {
                print_news(n);
            }
            print_more_hint(&page);
        }
        None => {
            let result = search.albums_and_news(keyword).await?;
            println!("Albums:");
            for a in &result.albums {
                print_album(a);
            }
            println!("\nNews:");
            for n in &result.news {
                print_news(n);
            }
        }
    }
    Ok(())
}
