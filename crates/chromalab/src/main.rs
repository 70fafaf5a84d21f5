use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use crossterm::style::{Color, Stylize};

use chromalab_core::{
    AnswerOutcome, ConfigManager, JsonFileStore, MixSession, QuizQuestion, QuizSession, Settings,
    SAME_COLOR_NOTICE,
};
use chromalab_palette::{CatalogColor, ColorRegistry, Rgb};

/// Color mixing playground and quiz for learning how colors relate.
#[derive(Parser, Debug)]
#[command(name = "chromalab")]
#[command(about = "Interactive color mixing and quiz tool")]
struct Args {
    /// Path to the configuration file (default: config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the color wheel with its relations and temperature groups
    Wheel,
    /// Mix two catalog colors
    Mix {
        /// First ingredient (code like 5R, name like 빨강, or a hex value)
        first: String,
        /// Second ingredient
        second: String,
        /// Blend ratio from 0.0 (all first) to 1.0 (all second)
        #[arg(long, default_value = "0.5")]
        ratio: f64,
        /// Save the blend to the personal list under this name
        #[arg(long)]
        save: Option<String>,
    },
    /// Manage the personal color list
    Saved {
        #[command(subcommand)]
        action: SavedAction,
    },
    /// Play the color quiz
    Quiz {
        /// How many questions to answer correctly before the run ends
        #[arg(long, default_value = "5")]
        rounds: u32,
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show or reset the stored settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum SavedAction {
    /// List all saved colors
    List,
    /// Delete a saved color by id
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the active settings
    Show,
    /// Reset the settings file to defaults
    Reset,
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match args.command {
        Command::Wheel => cmd_wheel(),
        Command::Mix {
            first,
            second,
            ratio,
            save,
        } => cmd_mix(&first, &second, ratio, save.as_deref()),
        Command::Saved { action } => cmd_saved(action),
        Command::Quiz { rounds, seed } => cmd_quiz(args.config, rounds, seed),
        Command::Config { action } => cmd_config(args.config, action),
    }
}

fn cmd_wheel() -> Result<(), anyhow::Error> {
    let registry = ColorRegistry::new();

    println!("색상환:");
    for color in registry.wheel() {
        let relations = registry
            .relations(color.rgb)
            .context("wheel color without relations")?;
        println!(
            "  {} {:<4} {} ({})  비슷한 색: {}, {}  반대색: {}",
            swatch(color.rgb),
            color.code,
            color.name,
            color.rgb,
            relations.similar[0].name,
            relations.similar[1].name,
            relations.opposite.name
        );
    }

    println!();
    println!("중성색:");
    for color in registry.neutrals() {
        println!(
            "  {} {:<4} {} ({})",
            swatch(color.rgb),
            color.code,
            color.name,
            color.rgb
        );
    }

    let warm: Vec<&str> = registry.warm_colors().iter().map(|c| c.name.as_str()).collect();
    let cool: Vec<&str> = registry.cool_colors().iter().map(|c| c.name.as_str()).collect();
    println!();
    println!("따뜻한 색: {}", warm.join(", "));
    println!("차가운 색: {}", cool.join(", "));
    Ok(())
}

fn cmd_mix(first: &str, second: &str, ratio: f64, save: Option<&str>) -> Result<(), anyhow::Error> {
    let store = JsonFileStore::open_default()?;
    let mut session = MixSession::new(Box::new(store));

    let candidates = session.registry().mixing_colors();
    let first = resolve_color(&candidates, first)?.clone();
    let second = resolve_color(&candidates, second)?.clone();

    if first.rgb == second.rgb {
        println!("{} {}", swatch(first.rgb), SAME_COLOR_NOTICE);
        println!("{} {} ({})", swatch(first.rgb), first.name, first.rgb);
        return Ok(());
    }

    session.select_color(first.rgb);
    session.select_color(second.rgb);
    session.set_ratio(ratio);

    let result = session
        .result()
        .context("both mixer slots should be filled")?;
    println!(
        "{} {} + {} {}  (ratio {:.2})",
        swatch(first.rgb),
        first.name,
        swatch(second.rgb),
        second.name,
        session.ratio()
    );
    println!(
        "= {} {} ({})",
        swatch(result.rgb()),
        result.name(),
        result.rgb()
    );

    if let Some(hints) = session.relation_hints() {
        println!(
            "{}의 비슷한 색: {}, {}  반대색: {}",
            first.name,
            hints.similar[0].name,
            hints.similar[1].name,
            hints.opposite.name
        );
    }

    if let Some(name) = save {
        let entry = session.save_result(name)?;
        println!("저장했어요: {} (id {})", entry.custom_name, entry.id);
    }
    Ok(())
}

fn cmd_saved(action: SavedAction) -> Result<(), anyhow::Error> {
    let store = JsonFileStore::open_default()?;
    let mut session = MixSession::new(Box::new(store));

    match action {
        SavedAction::List => {
            if session.saved().is_empty() {
                println!("아직 저장된 색상이 없어요...");
                return Ok(());
            }
            println!("나만의 색상 목록:");
            for color in session.saved() {
                println!(
                    "  {} {} ({}, {})  id {}",
                    swatch(color.rgb),
                    color.custom_name,
                    color.name,
                    color.rgb,
                    color.id
                );
            }
        }
        SavedAction::Delete { id } => {
            if session.delete_saved(&id) {
                println!("삭제했어요.");
            } else {
                anyhow::bail!("no saved color with id {:?}", id);
            }
        }
    }
    Ok(())
}

fn cmd_quiz(
    config_path: Option<PathBuf>,
    rounds: u32,
    seed: Option<u64>,
) -> Result<(), anyhow::Error> {
    let mut manager = ConfigManager::new(config_path);
    let settings = match manager.load() {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("could not load settings ({}), using defaults", e);
            Settings::default()
        }
    };

    let mut session = match seed {
        Some(seed) => QuizSession::seeded(settings, seed),
        None => QuizSession::new(settings),
    };

    println!("{}", "알록달록 색깔 퀴즈!".bold());
    session.next_question();

    let stdin = io::stdin();
    let mut line = String::new();
    let mut completed = 0;

    while completed < rounds {
        let question = match session.question() {
            Some(question) => question.clone(),
            None => break,
        };

        println!();
        println!("점수: {}", session.score());
        print_question(&question, session.selection());
        print!(
            "[1-{}] 답 / n 다른 문제 풀기 / q 그만하기 > ",
            question.option_count()
        );
        io::stdout().flush()?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();

        match input {
            "q" => break,
            "n" => {
                session.next_question();
                continue;
            }
            _ => {}
        }

        let choice = match input.parse::<usize>() {
            Ok(choice) if choice >= 1 && choice <= question.option_count() => choice - 1,
            _ => {
                println!("1부터 {} 사이의 번호를 입력해 주세요.", question.option_count());
                continue;
            }
        };

        match session.submit(choice, Instant::now()) {
            AnswerOutcome::Correct => {
                println!("{}", "정답이에요!".green().bold());
                completed += 1;
                wait_for_pending(&mut session);
            }
            AnswerOutcome::Incorrect => {
                println!("{}", "아쉬워요, 다시 생각해 보세요!".red());
                wait_for_pending(&mut session);
            }
            AnswerOutcome::PartialSelection => {}
            AnswerOutcome::Ignored => {
                log::debug!("submission ignored");
            }
        }
    }

    println!();
    println!("최종 점수: {}", session.score());
    Ok(())
}

fn cmd_config(config_path: Option<PathBuf>, action: ConfigAction) -> Result<(), anyhow::Error> {
    let mut manager = ConfigManager::new(config_path);
    match action {
        ConfigAction::Show => {
            let settings = manager.load()?;
            println!("config file: {}", manager.config_path().display());
            println!("feedback_delay_ms  = {}", settings.feedback_delay_ms);
            println!("mix_question_bias  = {}", settings.mix_question_bias);
            println!("points_per_correct = {}", settings.points_per_correct);
        }
        ConfigAction::Reset => {
            manager.reset_to_defaults()?;
            println!(
                "settings reset to defaults at {}",
                manager.config_path().display()
            );
        }
    }
    Ok(())
}

fn print_question(question: &QuizQuestion, selection: &[Rgb]) {
    println!("{}", question.prompt());
    if let Some(instruction) = question.instruction() {
        println!("{}", instruction);
    }
    match question {
        QuizQuestion::Mix(question) => {
            println!(
                "  {} {} ({})",
                swatch(question.target.rgb),
                question.target.name,
                question.target.rgb
            );
            for (i, pair) in question.options.iter().enumerate() {
                println!(
                    "  {}) {} {} + {} {}",
                    i + 1,
                    swatch(pair.first.rgb),
                    pair.first.name,
                    swatch(pair.second.rgb),
                    pair.second.name
                );
            }
        }
        QuizQuestion::Relation(question) => {
            for (i, option) in question.options.iter().enumerate() {
                let mark = if selection.contains(&option.rgb) { "*" } else { " " };
                println!(
                    "  {}){} {} {}",
                    i + 1,
                    mark,
                    swatch(option.rgb),
                    option.name
                );
            }
        }
    }
}

// Wait out the feedback delay, then let the session run its transition.
fn wait_for_pending(session: &mut QuizSession) {
    if let Some(due) = session.pending_due() {
        thread::sleep(due.saturating_duration_since(Instant::now()));
        session.tick(Instant::now());
    }
}

fn swatch(rgb: Rgb) -> String {
    "  ".on(Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    })
    .to_string()
}

fn resolve_color<'a>(
    candidates: &[&'a CatalogColor],
    input: &str,
) -> Result<&'a CatalogColor, anyhow::Error> {
    if let Some(&color) = candidates.iter().find(|c| c.code.eq_ignore_ascii_case(input)) {
        return Ok(color);
    }
    if let Some(&color) = candidates.iter().find(|c| c.name == input) {
        return Ok(color);
    }
    if let Ok(rgb) = input.parse::<Rgb>() {
        if let Some(&color) = candidates.iter().find(|c| c.rgb == rgb) {
            return Ok(color);
        }
    }
    anyhow::bail!(
        "unknown color {:?} (use a code like 5R, a name like 빨강, or a hex value)",
        input
    )
}
