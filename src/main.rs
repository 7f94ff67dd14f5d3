use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use learning_store::api::{FiltersPatch, MaterialQuery, SortBy, SortOrder};
use learning_store::entities::MaterialType;
use learning_store::logging::{self, LogSink};
use learning_store::slices::auth::{Credentials, Registration};
use learning_store::slices::materials::MaterialsAction;
use learning_store::{ApiClients, Config, MockApi, MockLatency, Store};

#[derive(Parser)]
#[command(name = "learning-store")]
#[command(about = "Drive the learning platform store against the mock backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: the platform config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the category grid
    Categories,

    /// Fetch the material list
    Materials {
        /// Only materials of this category id
        #[arg(long)]
        category: Option<String>,

        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },

    /// Search materials
    Search {
        query: String,

        #[arg(long = "type", value_enum)]
        material_type: Option<TypeArg>,

        #[arg(long, value_enum)]
        sort: Option<SortArg>,

        #[arg(long, value_enum)]
        order: Option<OrderArg>,
    },

    /// Fetch banners and show the active ones
    Banners,

    /// Sign in
    Login { email: String, password: String },

    /// Create an account
    Register {
        name: String,
        email: String,
        password: String,
    },

    /// Show the theme
    Theme {
        /// Flip light/dark first
        #[arg(long)]
        toggle: bool,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Categories => "categories",
            Commands::Materials { .. } => "materials",
            Commands::Search { .. } => "search",
            Commands::Banners => "banners",
            Commands::Login { .. } => "login",
            Commands::Register { .. } => "register",
            Commands::Theme { .. } => "theme",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TypeArg {
    Pdf,
    Ppt,
    Doc,
    Video,
    Image,
}

impl From<TypeArg> for MaterialType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Pdf => MaterialType::Pdf,
            TypeArg::Ppt => MaterialType::Ppt,
            TypeArg::Doc => MaterialType::Doc,
            TypeArg::Video => MaterialType::Video,
            TypeArg::Image => MaterialType::Image,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Date,
    Title,
    Views,
    Downloads,
}

impl From<SortArg> for SortBy {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Date => SortBy::Date,
            SortArg::Title => SortBy::Title,
            SortArg::Views => SortBy::Views,
            SortArg::Downloads => SortBy::Downloads,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Asc => SortOrder::Asc,
            OrderArg::Desc => SortOrder::Desc,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogSink::resolve(cli.verbose), cli.command.name());

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    let api = Arc::new(MockApi::seeded(MockLatency::from(&config.api)));
    let store = Store::new(ApiClients::from_shared(api), &config);

    let outcome = run_command(&store, cli.command).await;
    store.shutdown();
    outcome
}

async fn run_command(store: &Store, command: Commands) -> Result<()> {
    match command {
        Commands::Categories => {
            let outcome = store.fetch_categories().await;
            print_json(&store.get_state().categories)?;
            outcome?;
        }
        Commands::Materials { category, pages } => {
            let mut query = MaterialQuery::first_page(store.config().materials.page_size);
            if let Some(category) = category {
                query = query.in_category(category);
            }
            let mut outcome = store.fetch_materials(query).await;
            for _ in 1..pages {
                if outcome.is_err() {
                    break;
                }
                let Some(next) = store.load_more_materials() else {
                    break;
                };
                outcome = next.await;
            }
            print_json(&store.get_state().materials)?;
            outcome?;
        }
        Commands::Search {
            query,
            material_type,
            sort,
            order,
        } => {
            store.dispatch(MaterialsAction::SetFilters(FiltersPatch {
                material_type: material_type.map(|t| Some(t.into())),
                sort_by: sort.map(Into::into),
                sort_order: order.map(Into::into),
                ..FiltersPatch::default()
            }));
            let outcome = store.search_materials(query).await;
            let state = store.get_state();
            let results: Vec<_> = state.materials.search_results().collect();
            print_json(&results)?;
            outcome?;
        }
        Commands::Banners => {
            let outcome = store.fetch_banners().await;
            print_json(&store.get_state().banners)?;
            outcome?;
        }
        Commands::Login { email, password } => {
            Credentials::new(email.as_str(), password.as_str()).validate()?;
            let outcome = store.login(email, password).await;
            print_json(&store.get_state().auth)?;
            outcome?;
        }
        Commands::Register {
            name,
            email,
            password,
        } => {
            Registration {
                name: name.clone(),
                email: email.clone(),
                password: password.clone(),
                confirm_password: password.clone(),
            }
            .validate()?;
            let outcome = store.register(email, password, name).await;
            print_json(&store.get_state().auth)?;
            outcome?;
        }
        Commands::Theme { toggle } => {
            if toggle {
                store.toggle_theme();
            }
            print_json(&store.get_state().theme)?;
        }
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
