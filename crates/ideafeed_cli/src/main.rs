//! Interactive terminal front-end for the idea feed.
//!
//! # Responsibility
//! - Own one feed session lifecycle: seed on start, discard on exit.
//! - Map line commands onto session actions and render the result.
//!
//! Usage: `ideafeed_cli [seed] [count]`.

use ideafeed_core::db::open_db_in_memory;
use ideafeed_core::{
    default_log_level, init_logging, FeedAction, FeedPage, FeedService, FeedSession, IdeaGenerator,
    SessionNotice, SqliteIdeaRepository, DEFAULT_IDEA_COUNT,
};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

const DEFAULT_SEED: u64 = 42;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    // Logging is best-effort for an interactive tool; a read-only temp dir
    // should not keep the feed from starting.
    let log_dir = std::env::temp_dir().join("ideafeed-logs");
    if let Err(err) = init_logging(default_log_level(), &log_dir.to_string_lossy()) {
        eprintln!("warning: logging disabled: {err}");
    }

    let (seed, count) = parse_args()?;

    let conn = open_db_in_memory()?;
    let repo = SqliteIdeaRepository::try_new(&conn)?;
    let service = FeedService::new(repo);

    let now_ms = unix_time_ms();
    let mut generator = IdeaGenerator::new(seed, now_ms);
    let seeded = service.seed(&mut generator, count)?;

    let mut session = FeedSession::new(service);

    println!("Ideas in Motion: {seeded} ideas seeded (seed {seed})");
    println!("Support ideas that matter. Watch them grow with momentum over time.");
    println!();
    render_page(&session.view()?);
    print_help();

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let input = line.trim();
        let (command, rest) = match input.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command {
            "" => {}
            "search" => {
                let update = session.apply(FeedAction::SetQuery(rest.to_string()))?;
                render_page(&update.page);
            }
            "next" => {
                let update = session.apply(FeedAction::NextPage)?;
                render_page(&update.page);
            }
            "prev" => {
                let update = session.apply(FeedAction::PrevPage)?;
                render_page(&update.page);
            }
            "support" => match rest.parse::<i64>() {
                Ok(id) => match session.apply(FeedAction::Support(id)) {
                    Ok(update) => {
                        if let Some(SessionNotice::AlreadySupported(id)) = update.notice {
                            println!("You already supported idea {id}.");
                        } else {
                            println!("Supported idea {id}.");
                        }
                        render_page(&update.page);
                    }
                    Err(err) => println!("{err}"),
                },
                Err(_) => println!("usage: support <id>"),
            },
            "show" => render_page(&session.view()?),
            "json" => println!("{}", serde_json::to_string_pretty(&session.view()?)?),
            "help" => print_help(),
            "quit" | "exit" => break,
            other => println!("unknown command `{other}`; try `help`"),
        }
    }

    Ok(())
}

fn parse_args() -> Result<(u64, usize), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);

    let seed = match args.next() {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| format!("seed must be a non-negative integer, got `{raw}`"))?,
        None => DEFAULT_SEED,
    };
    let count = match args.next() {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| format!("count must be a non-negative integer, got `{raw}`"))?,
        None => DEFAULT_IDEA_COUNT,
    };

    Ok((seed, count))
}

fn unix_time_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

fn render_page(page: &FeedPage) {
    println!();
    if page.ideas.is_empty() {
        if page.total_matches == 0 {
            println!("No ideas match the current search.");
        } else {
            println!("Nothing on this page; try `prev`.");
        }
    }

    for idea in &page.ideas {
        println!("{} {}  [id {}]", idea.icon, idea.title, idea.id);
        println!("    {}", idea.description);
        println!("    Tags: #{}", idea.tag);
        println!("    Shared by {}", idea.author);
        println!(
            "    Support: {:.1} | Velocity: {:.2} | Acceleration: {:.2}",
            idea.support, idea.velocity, idea.acceleration
        );
    }

    println!();
    println!(
        "Page {} of {} ({} matching ideas)",
        page.page + 1,
        page.total_pages,
        page.total_matches
    );
}

fn print_help() {
    println!();
    println!("commands:");
    println!("  search <text>   filter ideas by keyword or tag (blank to clear)");
    println!("  next / prev     move between pages");
    println!("  support <id>    support an idea (once per session)");
    println!("  show            re-render the current page");
    println!("  json            dump the current page as JSON");
    println!("  quit            leave the feed");
}
