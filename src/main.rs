use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use vibewear::advice::render_prompt;
use vibewear::analytics::{self, Cleanliness, InventoryQuery, LevelProgress, SortKey};
use vibewear::config::Config;
use vibewear::domain::{Category, ItemDraft, ItemPatch, ProfilePatch, WardrobeItem};
use vibewear::engine::Effect;
use vibewear::logging::init_tracing;
use vibewear::session::{Session, SessionOptions};
use vibewear::store::JsonFileStore;

/// Wardrobe tracker with streaks, quests and XP.
#[derive(Debug, Parser)]
#[command(name = "vibewear", version, about)]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show profile, streak, level and today's quest
    Status,

    /// Log today's outfit
    Log {
        /// Ids of the worn items
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Mark today's quest as completed
    Quest,

    /// Mark every item clean
    Laundry,

    /// Manage wardrobe items
    #[command(subcommand)]
    Item(ItemCommands),

    /// Manage the wishlist
    #[command(subcommand)]
    Wishlist(WishlistCommands),

    /// Manage the shopping budget
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Wardrobe analytics and achievements
    Stats,

    /// Show recent outfit logs
    Logs {
        /// Number of logs to print
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },

    /// Show or edit the style profile
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Edit stylist and app settings
    Settings {
        /// Custom stylist persona
        #[arg(long)]
        persona: Option<String>,
        #[arg(long)]
        sass: Option<bool>,
        #[arg(long)]
        sound: Option<bool>,
        #[arg(long)]
        weather: Option<bool>,
        /// Stylist API key
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },

    /// Replace items and wishlist with a starter wardrobe
    Seed {
        #[arg(long)]
        sample: bool,
    },

    /// Pick a random clean outfit for tomorrow
    Plan,

    /// Print the stylist prompt for the current wardrobe
    Prompt,

    /// Apply one JSON-encoded command
    Dispatch {
        /// e.g. '{"type":"LAUNDRY_DAY"}'
        json: String,
    },

    /// Write a full backup
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Restore from a backup file
    Import { path: PathBuf },

    /// Erase all data
    Reset {
        /// Skip the safety check
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
enum ItemCommands {
    /// Add an item
    Add {
        name: String,
        #[arg(short, long, default_value = "top")]
        category: Category,
        #[arg(short, long)]
        price: Option<f64>,
        #[arg(long)]
        color: Option<String>,
    },

    /// Edit fields of an item
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        category: Option<Category>,
        #[arg(short, long)]
        price: Option<f64>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        wears: Option<u32>,
    },

    /// Flip clean/dirty
    Toggle { id: String },

    /// Delete an item
    Remove { id: String },

    /// List items
    List {
        #[arg(short, long)]
        category: Option<Category>,
        #[arg(long)]
        clean: bool,
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long, value_enum, default_value_t = SortArg::Newest)]
        sort: SortArg,
    },
}

#[derive(Debug, Subcommand)]
enum WishlistCommands {
    /// Add a wishlist entry
    Add {
        name: String,
        #[arg(short, long, default_value = "top")]
        category: Category,
        #[arg(short, long)]
        price: Option<f64>,
    },

    /// Drop a wishlist entry
    Remove { id: String },

    /// Buy a wishlist entry, moving it into the wardrobe
    Buy { id: String },

    /// List wishlist entries
    List,
}

#[derive(Debug, Subcommand)]
enum ProfileCommands {
    /// Print the profile
    Show,

    /// Set onboarding answers
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        display_name: Option<String>,
        /// 0 = tight, 100 = loose
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        fit: Option<u8>,
        /// 0 = neutral, 100 = vibrant
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        color: Option<u8>,
        /// 0 = utility, 100 = aesthetic
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        style: Option<u8>,
        #[arg(long)]
        lifestyle: Option<String>,
        #[arg(long)]
        climate: Option<String>,
        #[arg(long)]
        body_type: Option<String>,
        #[arg(long)]
        accessory_vibe: Option<String>,
        /// Repeat for several textures
        #[arg(long = "texture")]
        textures: Vec<String>,
        #[arg(long = "era")]
        style_eras: Vec<String>,
        #[arg(long = "dislike")]
        fashion_dislikes: Vec<String>,
        /// Starting shopping budget
        #[arg(long, allow_hyphen_values = true)]
        budget: Option<f64>,
    },
}

#[derive(Debug, Subcommand)]
enum BudgetCommands {
    /// Set the budget
    Set {
        #[arg(allow_hyphen_values = true)]
        amount: f64,
    },

    /// Add to (or subtract from) the budget
    Adjust {
        #[arg(allow_hyphen_values = true)]
        delta: f64,
    },

    /// Print the budget
    Show,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Newest,
    Name,
    MostWorn,
    LeastWorn,
    Cpw,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Newest => SortKey::Newest,
            SortArg::Name => SortKey::Name,
            SortArg::MostWorn => SortKey::MostWorn,
            SortArg::LeastWorn => SortKey::LeastWorn,
            SortArg::Cpw => SortKey::CostPerWear,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    let data_dir = cli.data_dir.clone().unwrap_or_else(|| config.data_dir());
    debug!(dir = %data_dir.display(), "Opening store");
    let store = JsonFileStore::open(&data_dir)
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;

    let options = SessionOptions::default().with_quest_pool(config.quest_pool());
    let (mut session, _report) = Session::open(store, options);

    run(&mut session, cli.command, &config)
}

fn run(session: &mut Session<JsonFileStore>, command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Status => print_status(session),
        Commands::Log { ids } => {
            let unknown: Vec<_> = ids
                .iter()
                .filter(|id| session.state().item(id).is_none())
                .collect();
            if !unknown.is_empty() {
                eprintln!("Ignoring unknown ids: {:?}", unknown);
            }
            print_effects(&session.log_outfit(ids));
            println!("Streak: {} day(s)", session.state().profile.streak);
        }
        Commands::Quest => {
            let effects = session.complete_quest();
            if effects.is_empty() {
                println!("Quest already completed today.");
            }
            print_effects(&effects);
        }
        Commands::Laundry => {
            let effects = session.laundry_day();
            if effects.is_empty() {
                println!("Everything is already clean.");
            }
            print_effects(&effects);
        }
        Commands::Item(cmd) => run_item(session, cmd)?,
        Commands::Wishlist(cmd) => run_wishlist(session, cmd)?,
        Commands::Budget(cmd) => {
            match cmd {
                BudgetCommands::Set { amount } => {
                    session.execute(vibewear::engine::Command::SetBudget { amount });
                }
                BudgetCommands::Adjust { delta } => {
                    session.execute(vibewear::engine::Command::AdjustBudget { delta });
                }
                BudgetCommands::Show => {}
            }
            println!("Budget: {:.2}", session.state().budget);
        }
        Commands::Stats => print_stats(session),
        Commands::Logs { limit } => {
            let logs = &session.state().outfit_logs;
            if logs.is_empty() {
                println!("No outfits logged yet.");
            }
            for log in logs.iter().take(limit) {
                println!(
                    "{}  vibe {}  {}",
                    log.timestamp.format("%Y-%m-%d"),
                    log.vibe_score,
                    log.item_names().join(", ")
                );
                if let Some(quest) = &log.quest_completed_text {
                    println!("    quest: {}", quest);
                }
            }
        }
        Commands::Profile(cmd) => run_profile(session, cmd)?,
        Commands::Settings {
            persona,
            sass,
            sound,
            weather,
            api_key,
            location,
        } => {
            let patch = ProfilePatch {
                custom_persona: persona,
                sass_mode: sass,
                sound_effects: sound,
                show_weather: weather,
                ..Default::default()
            };
            if patch.is_empty() && api_key.is_none() && location.is_none() {
                bail!("Nothing to change");
            }
            if !patch.is_empty() {
                session.update_profile(patch);
            }
            if let Some(key) = api_key {
                session.execute(vibewear::engine::Command::SetApiKey { key });
            }
            if let Some(location) = location {
                session.execute(vibewear::engine::Command::SetLocation { location });
            }
            println!("Settings saved.");
        }
        Commands::Seed { sample } => {
            if !sample {
                bail!("Nothing to seed, pass --sample to load the starter wardrobe");
            }
            session.load_sample_data();
            println!(
                "Loaded {} items and {} wishlist entries.",
                session.state().inventory.len(),
                session.state().wishlist.len()
            );
        }
        Commands::Plan => {
            let ids = session.plan_random_outfit();
            if ids.is_empty() {
                println!("No clean tops, bottoms or shoes to plan with.");
            }
            for id in &ids {
                if let Some(item) = session.state().item(id) {
                    println!("{}", format_item(item));
                }
            }
        }
        Commands::Prompt => {
            let state = session.state();
            let clean: Vec<WardrobeItem> = state.clean_items().cloned().collect();
            print!("{}", render_prompt(&state.profile, &clean, None));
        }
        Commands::Dispatch { json } => {
            let effects = session
                .execute_json(&json)
                .context("Invalid command JSON")?;
            print_effects(&effects);
        }
        Commands::Export { output } => {
            let json = session.export(&config.advice.model).to_json()?;
            match output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Backup written to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
        Commands::Import { path } => {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let model = session.restore(&json)?;
            println!("Restored backup (model: {})", model);
        }
        Commands::Reset { yes } => {
            if !yes {
                bail!("Refusing to erase all data without --yes");
            }
            session.clear_data();
            println!("All data cleared.");
        }
    }
    Ok(())
}

fn run_item(session: &mut Session<JsonFileStore>, cmd: ItemCommands) -> Result<()> {
    match cmd {
        ItemCommands::Add {
            name,
            category,
            price,
            color,
        } => {
            let mut draft = ItemDraft::new(name, category);
            draft.price = price;
            draft.color = color;
            let (id, effects) = session.add_item(draft);
            println!("Added {}", id);
            print_effects(&effects);
        }
        ItemCommands::Update {
            id,
            name,
            category,
            price,
            color,
            wears,
        } => {
            require_item(session, &id)?;
            let patch = ItemPatch {
                name,
                category,
                price,
                color,
                wear_count: wears,
                ..Default::default()
            };
            if patch.is_empty() {
                bail!("Nothing to update");
            }
            session.update_item(&id, patch);
        }
        ItemCommands::Toggle { id } => {
            require_item(session, &id)?;
            session.execute(vibewear::engine::Command::ToggleClean { id: id.clone() });
            if let Some(item) = session.state().item(&id) {
                println!("{}", format_item(item));
            }
        }
        ItemCommands::Remove { id } => {
            require_item(session, &id)?;
            session.execute(vibewear::engine::Command::DeleteItem { id });
        }
        ItemCommands::List {
            category,
            clean,
            search,
            sort,
        } => {
            let query = InventoryQuery {
                category,
                clean_only: clean,
                search,
                sort: sort.into(),
            };
            for item in analytics::query(&session.state().inventory, &query) {
                println!("{}", format_item(item));
            }
        }
    }
    Ok(())
}

fn run_profile(session: &mut Session<JsonFileStore>, cmd: ProfileCommands) -> Result<()> {
    match cmd {
        ProfileCommands::Show => {}
        ProfileCommands::Set {
            name,
            display_name,
            fit,
            color,
            style,
            lifestyle,
            climate,
            body_type,
            accessory_vibe,
            textures,
            style_eras,
            fashion_dislikes,
            budget,
        } => {
            let non_empty = |v: Vec<String>| (!v.is_empty()).then_some(v);
            let patch = ProfilePatch {
                name,
                display_name,
                fit_preference: fit,
                color_palette: color,
                utility_vs_aesthetic: style,
                lifestyle,
                climate,
                body_type,
                accessory_vibe,
                textures: non_empty(textures),
                style_eras: non_empty(style_eras),
                fashion_dislikes: non_empty(fashion_dislikes),
                ..Default::default()
            };
            if patch.is_empty() && budget.is_none() {
                bail!("Nothing to update");
            }
            if !patch.is_empty() {
                session.update_profile(patch);
            }
            if let Some(amount) = budget {
                session.execute(vibewear::engine::Command::SetBudget { amount });
            }
        }
    }
    print_profile(session);
    Ok(())
}

fn run_wishlist(session: &mut Session<JsonFileStore>, cmd: WishlistCommands) -> Result<()> {
    match cmd {
        WishlistCommands::Add {
            name,
            category,
            price,
        } => {
            let mut draft = ItemDraft::new(name, category);
            draft.price = price;
            let (id, effects) = session.add_to_wishlist(draft);
            println!("Added {}", id);
            print_effects(&effects);
        }
        WishlistCommands::Remove { id } => {
            session.execute(vibewear::engine::Command::RemoveFromWishlist { id });
        }
        WishlistCommands::Buy { id } => {
            if session.state().wishlist_item(&id).is_none() {
                bail!("No wishlist entry with id {}", id);
            }
            print_effects(&session.buy_item(&id));
            println!("Budget: {:.2}", session.state().budget);
        }
        WishlistCommands::List => {
            let state = session.state();
            for item in &state.wishlist {
                println!(
                    "{}  {} [{}] {}",
                    item.id,
                    item.name,
                    item.category,
                    item.price.map(|p| format!("{:.2}", p)).unwrap_or_default()
                );
            }
            println!(
                "Total: {:.2} / budget {:.2}",
                analytics::wishlist_total(&state.wishlist),
                state.budget
            );
        }
    }
    Ok(())
}

fn require_item(session: &Session<JsonFileStore>, id: &str) -> Result<()> {
    if session.state().item(id).is_none() {
        bail!("No item with id {}", id);
    }
    Ok(())
}

fn print_status(session: &Session<JsonFileStore>) {
    let state = session.state();
    let profile = &state.profile;
    let level = LevelProgress::from_xp(profile.xp);
    println!("Hey {}!", profile.greeting_name());
    if !profile.is_onboarded() {
        println!("Run `vibewear profile set --name <name>` to finish onboarding.");
    }
    println!(
        "Level {} ({}/{} XP), streak {} day(s)",
        level.level, level.into_level, level.per_level, profile.streak
    );
    if !profile.badges.is_empty() {
        let badges: Vec<_> = profile.badges.iter().collect();
        println!("Badges: {}", badges.join(", "));
    }
    let quest = &state.daily_quest;
    println!(
        "Quest: {} {}",
        quest.text,
        if quest.is_completed { "(done)" } else { "" }
    );
    println!(
        "Items: {} ({} dirty), budget {:.2}",
        state.inventory.len(),
        state.dirty_count(),
        state.budget
    );
    println!("Data: {}", session.store().dir().display());
}

fn print_profile(session: &Session<JsonFileStore>) {
    let state = session.state();
    let p = &state.profile;
    println!("Name: {}", p.greeting_name());
    println!(
        "Fit {} / Color {} / Style {}",
        p.fit_preference, p.color_palette, p.utility_vs_aesthetic
    );
    let answers = [
        ("Lifestyle", p.lifestyle.as_deref()),
        ("Climate", p.climate.as_deref()),
        ("Body type", p.body_type.as_deref()),
        ("Accessories", p.accessory_vibe.as_deref()),
    ];
    for (label, value) in answers {
        if let Some(value) = value {
            println!("{}: {}", label, value);
        }
    }
    let lists = [
        ("Textures", &p.textures),
        ("Eras", &p.style_eras),
        ("Dislikes", &p.fashion_dislikes),
    ];
    for (label, values) in lists {
        if !values.is_empty() {
            println!("{}: {}", label, values.join(", "));
        }
    }
    println!(
        "Sass {}, sounds {}, weather {}",
        on_off(p.sass_mode),
        on_off(p.sound_effects),
        on_off(p.show_weather)
    );
    println!("Budget: {:.2}", state.budget);
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

fn print_stats(session: &Session<JsonFileStore>) {
    let inventory = &session.state().inventory;
    let mut counts = analytics::category_breakdown(inventory);
    for category in Category::all() {
        let count = counts.remove(&category).unwrap_or(0);
        println!("{:<10} {}", category, count);
    }
    for (category, count) in counts {
        println!("{:<10} {}", category, count);
    }
    let cleanliness = Cleanliness::of(inventory);
    println!(
        "Clean: {}% ({} clean, {} dirty)",
        cleanliness.percent_clean(),
        cleanliness.clean,
        cleanliness.dirty
    );
    println!("Wardrobe value: {:.2}", analytics::wardrobe_value(inventory));
    println!("Most worn:");
    for item in analytics::most_worn(inventory, 3) {
        println!("  {}", format_item(item));
    }
    let unlocked = analytics::unlocked_achievements(inventory);
    for achievement in analytics::Achievement::all() {
        let mark = if unlocked.contains(achievement) { "x" } else { " " };
        println!("[{}] {}: {}", mark, achievement.title(), achievement.description());
    }
}

fn format_item(item: &WardrobeItem) -> String {
    let cpw = analytics::item_cost_per_wear(item)
        .map(|c| format!(" cpw {:.2}", c.value))
        .unwrap_or_default();
    format!(
        "{}  {} [{}] {} worn {}x{}",
        item.id,
        item.name,
        item.category,
        if item.is_clean { "clean" } else { "dirty" },
        item.wear_count,
        cpw
    )
}

fn print_effects(effects: &[Effect]) {
    for effect in effects {
        println!("+{} XP ({})", effect.xp_earned(), effect.source());
        if let Some(badge) = effect.earned_badge() {
            println!("Badge unlocked: {}", badge);
        }
    }
}
