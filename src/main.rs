//! Clinic Site CLI
//!
//! Entry point for the `clinic-site` command-line tool.

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use clinic_site::auth::sha256_hex;
use clinic_site::editor::display_value;
use clinic_site::site_content::{lookup, ContentPath, FileStore, OverrideStore};
use clinic_site::{
    load_base, AdminGate, AppointmentRequest, ContentField, EditorSession, GateState, Lang,
    ListSection, SiteConfig, SiteRenderer,
};
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Exit code when an editing command runs without a valid admin session
const EXIT_NOT_LOGGED_IN: i32 = 2;

#[derive(Parser)]
#[command(name = "clinic-site")]
#[command(about = "Bilingual clinic site renderer and local content editor", version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Site root holding content.json and site.toml (default: current directory)
    #[arg(long, global = true, default_value = ".")]
    site: PathBuf,

    /// Path to a config file (default: <site>/site.toml when present)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Directory holding overrides and the admin session
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the site pages with overrides applied
    Render {
        /// Render only this language (plus index.html)
        #[arg(long)]
        lang: Option<Lang>,

        /// Output directory (default: config `output`)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Start an admin session.
    ///
    /// The password hash ships inside the published content document, so
    /// this only keeps casual visitors out of the editor. It is not access
    /// control.
    Login {
        #[arg(long)]
        password: String,
    },

    /// End the admin session
    Logout,

    /// Show whether an admin session is active
    Status,

    /// Print the SHA-256 hash of a password for meta.admin.passwordSha256
    HashPassword {
        password: String,
    },

    /// List editable fields with their effective values
    Fields {
        #[arg(long)]
        lang: Option<Lang>,
    },

    /// Print the effective value at a dotted path ({lang} is substituted)
    Get {
        path: String,

        #[arg(long)]
        lang: Option<Lang>,
    },

    /// Edit a field (see `fields` for ids)
    Set {
        field: ContentField,
        value: String,

        #[arg(long)]
        lang: Option<Lang>,
    },

    /// List the items of a section (services, doctors, testimonials, results)
    Items {
        section: ListSection,

        #[arg(long)]
        lang: Option<Lang>,
    },

    /// Edit one field of one list item
    ItemSet {
        section: ListSection,
        index: usize,
        field: String,
        value: String,

        #[arg(long)]
        lang: Option<Lang>,
    },

    /// Append a template item to a section
    Add {
        section: ListSection,

        #[arg(long)]
        lang: Option<Lang>,
    },

    /// Delete an item from a section
    Delete {
        section: ListSection,
        index: usize,

        #[arg(long)]
        lang: Option<Lang>,
    },

    /// Print the stored overrides
    Preview,

    /// Remove all stored overrides
    Clear,

    /// Write the effective content document as JSON
    Export {
        /// Output file (default: config `export_path`)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the mailto: URL the appointment form would open
    Mailto {
        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "")]
        service: String,

        #[arg(long, default_value = "")]
        message: String,

        #[arg(long)]
        lang: Option<Lang>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    // Needs no site or config
    if let Commands::HashPassword { password } = &cli.command {
        run_hash_password(password);
        return;
    }

    let config = load_config(&cli.global);
    let store = FileStore::new(&config.state_dir);

    match cli.command {
        Commands::Render { lang, out } => run_render(&config, &store, lang, out),
        Commands::Login { password } => run_login(&config, &store, &password),
        Commands::Logout => run_logout(&store),
        Commands::Status => run_status(&config, &store),
        Commands::HashPassword { .. } => {}
        Commands::Fields { lang } => run_fields(&config, &store, lang),
        Commands::Get { path, lang } => run_get(&config, &store, &path, lang),
        Commands::Set { field, value, lang } => run_set(&config, &store, field, &value, lang),
        Commands::Items { section, lang } => run_items(&config, &store, section, lang),
        Commands::ItemSet {
            section,
            index,
            field,
            value,
            lang,
        } => run_item_set(&config, &store, section, index, &field, &value, lang),
        Commands::Add { section, lang } => run_add(&config, &store, section, lang),
        Commands::Delete {
            section,
            index,
            lang,
        } => run_delete(&config, &store, section, index, lang),
        Commands::Preview => run_preview(&config, &store),
        Commands::Clear => run_clear(&config, &store),
        Commands::Export { out } => run_export(&config, &store, out),
        Commands::Mailto {
            name,
            phone,
            service,
            message,
            lang,
        } => {
            let request = AppointmentRequest {
                name,
                phone,
                service,
                message,
            };
            run_mailto(&config, &store, &request, lang);
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(global: &GlobalArgs) -> SiteConfig {
    let cli_layer = global.state_dir.as_ref().map(|dir| {
        let mut layer = Map::new();
        layer.insert(
            "state_dir".to_string(),
            Value::String(dir.to_string_lossy().to_string()),
        );
        Value::Object(layer)
    });

    match SiteConfig::build(&global.site, global.config.as_deref(), cli_layer) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    }
}

fn load_base_or_exit(config: &SiteConfig) -> Value {
    match load_base(&config.content_path) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error loading content: {}", e);
            process::exit(1);
        }
    }
}

/// `--lang`, then config `default_lang`, then `meta.defaultLang`.
fn pick_lang(flag: Option<Lang>, config: &SiteConfig, doc: &Value) -> Lang {
    flag.or(config.default_lang)
        .unwrap_or_else(|| Lang::from_document(doc))
}

fn open_editor<'a>(
    config: &SiteConfig,
    store: &'a FileStore,
    lang: Option<Lang>,
) -> EditorSession<&'a FileStore> {
    let base = load_base_or_exit(config);

    if !AdminGate::new(store).is_logged_in(Utc::now()) {
        eprintln!("Not logged in. Run `clinic-site login --password <password>` first.");
        process::exit(EXIT_NOT_LOGGED_IN);
    }

    let lang = pick_lang(lang, config, &base);
    EditorSession::open(base, OverrideStore::new(store), lang)
}

fn exit_on_error<T, E: std::fmt::Display>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run_render(config: &SiteConfig, store: &FileStore, lang: Option<Lang>, out: Option<PathBuf>) {
    let base = load_base_or_exit(config);
    let overrides = OverrideStore::new(store).load();
    let renderer = SiteRenderer::new(&base, &overrides);

    let out_dir = out.unwrap_or_else(|| config.output.clone());
    exit_on_error(fs::create_dir_all(&out_dir));

    let default_lang = config.default_lang.unwrap_or_else(|| renderer.default_lang());
    let langs: Vec<Lang> = match lang {
        Some(l) => vec![l],
        None => Lang::ALL.to_vec(),
    };

    for l in &langs {
        let path = out_dir.join(format!("index.{}.html", l.code()));
        exit_on_error(fs::write(&path, renderer.render(*l)));
        println!("Wrote {}", path.display());
    }

    let index_lang = lang.unwrap_or(default_lang);
    let index = out_dir.join("index.html");
    exit_on_error(fs::write(&index, renderer.render(index_lang)));
    println!("Wrote {} ({})", index.display(), index_lang);
    info!(dir = %out_dir.display(), pages = langs.len() + 1, "site rendered");
}

fn run_login(config: &SiteConfig, store: &FileStore, password: &str) {
    let base = load_base_or_exit(config);
    let gate = AdminGate::new(store);

    match gate.login(&base, password, Utc::now()) {
        Ok(token) => {
            let until = token
                .expires_at_utc()
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| token.expires_at.to_string());
            println!("Logged in until {}", until);
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

fn run_logout(store: &FileStore) {
    exit_on_error(AdminGate::new(store).logout());
    println!("Logged out");
}

fn run_status(config: &SiteConfig, store: &FileStore) {
    let gate = AdminGate::new(store);
    let now = Utc::now();

    match gate.state(now) {
        GateState::LoggedIn => {
            let until = gate
                .token()
                .and_then(|t| t.expires_at_utc())
                .map(|t| t.to_rfc3339())
                .unwrap_or_default();
            println!("Logged in until {}", until);
        }
        GateState::LoggedOut => println!("Logged out"),
    }

    println!();
    println!("Content: {}", config.content_path.display());
    println!("State:   {}", config.state_dir.display());
    println!("Config sources:");
    for source in &config.sources {
        match (&source.path, &source.digest) {
            (Some(path), Some(digest)) => {
                println!("  {:<8} {} (sha256 {})", source.origin, path, digest)
            }
            _ => println!("  {}", source.origin),
        }
    }
}

fn run_hash_password(password: &str) {
    let hash = sha256_hex(password);
    println!("{}", hash);
    println!();
    println!("Paste into meta.admin in content.json:");
    println!("\"passwordSha256\": \"{}\"", hash);
}

fn run_fields(config: &SiteConfig, store: &FileStore, lang: Option<Lang>) {
    let editor = open_editor(config, store, lang);

    println!("Fields ({}):", editor.lang());
    for field in ContentField::ALL {
        let scope = if field.is_localized() {
            editor.lang().code()
        } else {
            "all"
        };
        let value = editor.field_value(field).replace('\n', " | ");
        println!(
            "  {:<24} [{}] {:<28} {}",
            field.id(),
            scope,
            field.label(),
            value
        );
    }
}

fn run_get(config: &SiteConfig, store: &FileStore, path: &str, lang: Option<Lang>) {
    let editor = open_editor(config, store, lang);
    let path: ContentPath = exit_on_error(path.parse());

    match editor.read_working_value(&path) {
        Some(Value::String(s)) => println!("{}", s),
        Some(value) => println!("{}", exit_on_error(serde_json::to_string_pretty(&value))),
        None => {
            eprintln!("No value at {}", path.resolve(editor.lang().code()));
            process::exit(1);
        }
    }
}

fn run_set(config: &SiteConfig, store: &FileStore, field: ContentField, value: &str, lang: Option<Lang>) {
    let mut editor = open_editor(config, store, lang);
    exit_on_error(editor.apply_edit(field, value));
    println!("{} = {}", field.id(), editor.field_value(field).replace('\n', " | "));
    print_preview(&editor);
}

fn run_items(config: &SiteConfig, store: &FileStore, section: ListSection, lang: Option<Lang>) {
    let editor = open_editor(config, store, lang);
    let items = editor.items(section);

    println!("{} ({}, {} items):", section, editor.lang(), items.len());
    for (index, item) in items.iter().enumerate() {
        println!("  #{}", index);
        for field in section.fields() {
            let value = display_value(lookup(item, field.key)).replace('\n', " | ");
            println!("    {:<10} {:<32} {}", field.key, field.label, value);
        }
    }
}

fn run_item_set(
    config: &SiteConfig,
    store: &FileStore,
    section: ListSection,
    index: usize,
    field: &str,
    value: &str,
    lang: Option<Lang>,
) {
    let mut editor = open_editor(config, store, lang);
    exit_on_error(editor.apply_item_edit(section, index, field, value));
    println!("{}[{}].{} updated", section, index, field);
    print_preview(&editor);
}

fn run_add(config: &SiteConfig, store: &FileStore, section: ListSection, lang: Option<Lang>) {
    let mut editor = open_editor(config, store, lang);
    let len = exit_on_error(editor.add_item(section));
    println!("Added {} item #{}", section, len - 1);
    print_preview(&editor);
}

fn run_delete(config: &SiteConfig, store: &FileStore, section: ListSection, index: usize, lang: Option<Lang>) {
    let mut editor = open_editor(config, store, lang);
    exit_on_error(editor.delete_item(section, index));
    println!("Deleted {} item #{}", section, index);
    print_preview(&editor);
}

fn run_preview(config: &SiteConfig, store: &FileStore) {
    let editor = open_editor(config, store, None);
    println!("{}", editor.preview());
}

fn run_clear(config: &SiteConfig, store: &FileStore) {
    let mut editor = open_editor(config, store, None);
    exit_on_error(editor.clear());
    println!("Overrides cleared");
}

fn run_export(config: &SiteConfig, store: &FileStore, out: Option<PathBuf>) {
    let editor = open_editor(config, store, None);
    let path = out.unwrap_or_else(|| config.export_path.clone());
    exit_on_error(editor.export(&path));
    println!("Exported {}", path.display());
}

fn run_mailto(config: &SiteConfig, store: &FileStore, request: &AppointmentRequest, lang: Option<Lang>) {
    let base = load_base_or_exit(config);
    let overrides = OverrideStore::new(store).load();
    let renderer = SiteRenderer::new(&base, &overrides);
    let lang = pick_lang(lang, config, renderer.effective());
    println!("{}", renderer.appointment_mailto(lang, request));
}

fn print_preview<S: clinic_site::site_content::KeyValueStore>(editor: &EditorSession<S>) {
    println!();
    println!("Overrides:");
    println!("{}", editor.preview());
}
