use clap::{Args, Parser, Subcommand};
use folio::admin::{self, ProjectForm};
use folio::app::{App, AppConfig};
use folio::catalogue;
use folio::config;
use folio::filter::SortOrder;
use folio::lightbox::{HeadlessPlatform, Key, Lightbox, Platform};
use folio::output;
use folio::render;
use folio::router::Page;
use folio::storage::FileStorage;
use folio::types::{Difficulty, ProjectType};
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    if env!("FOLIO_RELEASE_BUILD") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("FOLIO_GIT_DESCRIBE") {
        "" => "dev@unknown",
        // Leaked once at startup
        describe => Box::leak(format!("dev@{describe}").into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Portfolio of Frontend and UX Design projects")]
#[command(long_about = "\
Portfolio of Frontend and UX Design projects

The catalogue is a JSON array of project records. Everything else about
the site lives next to it:

  site/
  ├── config.toml        # Site settings (optional, see 'folio gen-config')
  ├── projects.json      # The catalogue
  ├── about.md           # About page (optional)
  └── assets/            # Copied verbatim into the rendered site

Admin state (password, logged-in flag) is kept in the state directory,
which defaults to .folio-state inside the site directory. Commands that
edit the catalogue require 'folio login' first and write projects.json
back in place.")]
#[command(version = version_string())]
struct Cli {
    /// Site directory
    #[arg(long, default_value = ".", global = true)]
    site: PathBuf,

    /// Directory for admin state [default: <site>/.folio-state]
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List projects of one type, filtered and sorted
    List(ListArgs),
    /// Show the tag chips offered for one type
    Tags {
        #[arg(long = "type", default_value = "frontend")]
        project_type: ProjectType,
    },
    /// Show every field of one project
    Show { id: String },
    /// Browse a project's gallery in the lightbox, driven from stdin
    Gallery {
        id: String,
        /// Behave like a touch device (fullscreen + landscape lock)
        #[arg(long)]
        touch: bool,
    },
    /// Validate the catalogue without rendering
    Check,
    /// Render the site as static HTML
    Render {
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Write the catalogue as projects.json into a directory
    Export {
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },
    /// Log in as admin
    Login { password: String },
    /// Log out
    Logout,
    /// Change the admin password
    Passwd { new: String, confirm: String },
    /// Create a project
    Add {
        #[arg(long = "type")]
        project_type: ProjectType,
        #[command(flatten)]
        fields: ProjectFields,
    },
    /// Edit a project; only the given fields change
    Edit {
        id: String,
        #[arg(long = "type")]
        project_type: Option<ProjectType>,
        #[command(flatten)]
        fields: ProjectFields,
    },
    /// Delete a project
    Delete { id: String },
    /// Move the project at catalogue position FROM to position TO (0-based)
    Move { from: usize, to: usize },
    /// Log out and forget the stored password
    Reset,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Args)]
struct ListArgs {
    #[arg(long = "type", default_value = "frontend")]
    project_type: ProjectType,
    /// Case-insensitive match on title or tags
    #[arg(long, default_value = "")]
    search: String,
    /// Required tag; repeat to require several
    #[arg(long = "tag")]
    tags: Vec<String>,
    /// newest, oldest, title-asc or title-desc
    #[arg(long, default_value = "newest")]
    sort: SortOrder,
}

/// Edit form fields. Lists are comma separated here, including process
/// steps and gallery images.
#[derive(Args)]
struct ProjectFields {
    #[arg(long)]
    title: Option<String>,
    /// Cover image URL
    #[arg(long, conflicts_with = "image_file")]
    image: Option<String>,
    /// Cover image file, inlined as a data URI
    #[arg(long)]
    image_file: Option<PathBuf>,
    #[arg(long)]
    duration: Option<String>,
    #[arg(long)]
    difficulty: Option<Difficulty>,
    #[arg(long)]
    outcome: Option<String>,
    #[arg(long)]
    stack: Option<String>,
    #[arg(long)]
    tags: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    role: Option<String>,
    #[arg(long)]
    process: Option<String>,
    #[arg(long)]
    challenges: Option<String>,
    #[arg(long)]
    gallery: Option<String>,
}

impl ProjectFields {
    fn apply(&self, form: &mut ProjectForm) -> Result<(), admin::AdminError> {
        let set = |target: &mut String, value: &Option<String>| {
            if let Some(v) = value {
                *target = v.clone();
            }
        };
        set(&mut form.title, &self.title);
        set(&mut form.image_url, &self.image);
        set(&mut form.duration, &self.duration);
        set(&mut form.outcome, &self.outcome);
        set(&mut form.stack, &self.stack);
        set(&mut form.tags, &self.tags);
        set(&mut form.date, &self.date);
        set(&mut form.description, &self.description);
        set(&mut form.role, &self.role);
        set(&mut form.challenges, &self.challenges);
        // The form takes these one per line.
        if let Some(v) = &self.process {
            form.process = v.replace(',', "\n");
        }
        if let Some(v) = &self.gallery {
            form.gallery = v.replace(',', "\n");
        }
        if let Some(d) = self.difficulty {
            form.difficulty = d;
        }
        if let Some(path) = &self.image_file {
            form.image_url = admin::inline_image(path)?;
        }
        Ok(())
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_app(site: &Path, state: &Path) -> Result<App, Box<dyn std::error::Error>> {
    let config = AppConfig::load(site)?;
    Ok(App::new(
        config,
        Box::new(FileStorage::new(state.join("local.json"))),
        Box::new(FileStorage::new(state.join("session.json"))),
    ))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let state = cli.state.clone().unwrap_or_else(|| cli.site.join(".folio-state"));
    let mut app = open_app(&cli.site, &state)?;

    match cli.command {
        Command::List(args) => {
            let query = app.query_mut(args.project_type);
            query.search = args.search;
            query.tags = args.tags.into_iter().collect();
            query.sort = args.sort;
            app.router_mut().navigate(Page::Projects(args.project_type));
            output::print_project_list(args.project_type, &app.visible_projects(args.project_type));
        }
        Command::Tags { project_type } => {
            for line in output::format_tags(project_type, &app.tag_chips(project_type)) {
                println!("{}", line);
            }
        }
        Command::Show { id } => {
            app.router_mut().select_project(&id);
            let project = app
                .selected_project()
                .ok_or_else(|| format!("no project with id '{id}'"))?;
            output::print_project_detail(project);
        }
        Command::Gallery { id, touch } => {
            app.router_mut().select_project(&id);
            let gallery = app
                .selected_project()
                .map(|p| p.gallery.clone())
                .ok_or_else(|| format!("no project with id '{id}'"))?;
            if gallery.is_empty() {
                println!("Project '{id}' has no gallery images");
                return Ok(());
            }
            if let Some(mut lightbox) = app.open_gallery(HeadlessPlatform::new(touch)) {
                run_gallery(&mut lightbox, &gallery)?;
            }
        }
        Command::Check => {
            let path = app.config().catalogue_path();
            let report = catalogue::check_catalogue(&path);
            output::print_check_report(&path, &report);
            if !report.is_ok() {
                return Err(format!("catalogue has {} error(s)", report.errors.len()).into());
            }
            println!("==> Catalogue is valid");
        }
        Command::Render { output: out } => {
            let summary = render::render_site(&app, &out)?;
            output::print_render_summary(&summary, &out);
        }
        Command::Export { output: out } => {
            let path = app.dashboard()?.export(&out)?;
            println!("Exported {} projects → {}", app.catalogue().len(), path.display());
        }
        Command::Login { password } => {
            if !app.session_mut().login(&password) {
                return Err("incorrect password".into());
            }
            println!("Logged in");
        }
        Command::Logout => {
            app.session_mut().logout();
            println!("Logged out");
        }
        Command::Passwd { new, confirm } => {
            app.session_mut().change_password(&new, &confirm)?;
            println!("Password changed");
        }
        Command::Add {
            project_type,
            fields,
        } => {
            let mut form = ProjectForm::blank(project_type);
            fields.apply(&mut form)?;
            let id = app.dashboard()?.create(&form)?;
            app.save_catalogue()?;
            println!("Created {id}");
        }
        Command::Edit {
            id,
            project_type,
            fields,
        } => {
            let mut form = app
                .catalogue()
                .get(&id)
                .map(ProjectForm::from_project)
                .ok_or_else(|| format!("no project with id '{id}'"))?;
            if let Some(ty) = project_type {
                form.project_type = ty;
            }
            fields.apply(&mut form)?;
            app.dashboard()?.edit(&id, &form)?;
            app.save_catalogue()?;
            println!("Updated {id}");
        }
        Command::Delete { id } => {
            let removed = app.dashboard()?.delete(&id)?;
            app.save_catalogue()?;
            println!("Deleted {} ({})", removed.id, removed.title);
        }
        Command::Move { from, to } => {
            app.dashboard()?.reorder(from, to)?;
            app.save_catalogue()?;
            println!("Moved {from} → {to}");
        }
        Command::Reset => {
            app.reset();
            println!("Admin state reset");
        }
        // Printed above, before any site state is touched.
        Command::GenConfig => {}
    }

    Ok(())
}

/// Drive a lightbox from stdin, one interaction per line:
///
/// ```text
/// open N       enlarge image N (1-based)
/// next, right  following image
/// prev, left   preceding image
/// swipe DX     horizontal swipe of DX pixels
/// esc          Escape key
/// close        click on the backdrop
/// leave        the platform leaves fullscreen on its own
/// quit
/// ```
///
/// The lightbox's state is printed after every line.
fn run_gallery(
    lightbox: &mut Lightbox<HeadlessPlatform>,
    gallery: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    for line in io::stdin().lock().lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        let Some(cmd) = words.next() else { continue };
        let arg = words.next();
        match cmd {
            "open" => match arg.and_then(|n| n.parse::<usize>().ok()) {
                Some(n) if n >= 1 => {
                    lightbox.open(n - 1);
                }
                _ => {
                    eprintln!("usage: open N");
                    continue;
                }
            },
            "next" | "right" => {
                lightbox.handle_key(Key::ArrowRight);
            }
            "prev" | "left" => {
                lightbox.handle_key(Key::ArrowLeft);
            }
            "swipe" => match arg.and_then(|dx| dx.parse::<f64>().ok()) {
                Some(dx) => {
                    lightbox.touch_start(0.0);
                    lightbox.touch_end(dx);
                }
                None => {
                    eprintln!("usage: swipe DX");
                    continue;
                }
            },
            "esc" => {
                lightbox.handle_key(Key::Escape);
            }
            "close" => {
                lightbox.backdrop_click();
            }
            "leave" => {
                if lightbox.platform().is_fullscreen() {
                    lightbox.platform_mut().fullscreen = false;
                    lightbox.did_exit_fullscreen();
                }
            }
            "quit" => break,
            other => {
                eprintln!("unknown command: {other}");
                continue;
            }
        }
        // The headless platform leaves fullscreen synchronously; report it.
        if lightbox.is_closing() && !lightbox.platform().is_fullscreen() {
            lightbox.did_exit_fullscreen();
        }
        println!(
            "{}",
            output::format_lightbox_state(lightbox.state(), lightbox.is_closing(), gallery)
        );
    }
    Ok(())
}
