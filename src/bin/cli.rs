// Storefront Core - Bookstore catalog, inquiry and quiz client
// Copyright (C) 2025 Storefront Core contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use storefront_core::api::{Book, QuizFilters, RegistrationForm, StorefrontClient};
use storefront_core::catalog::display::{author_name, availability_label, book_title, category_name, price_label};
use storefront_core::catalog::{CatalogBrowser, CatalogQuery, HomeShowcase};
use storefront_core::config::{Settings, LOCAL_CONFIG_FILE};
use storefront_core::inquiry::{InquiryComposer, LinkOpener};
use storefront_core::quiz::{QuizBoard, QuizOutcome};
use storefront_core::storage::{Database, SessionStore};
use storefront_core::StorefrontError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Bookstore storefront client.
#[derive(Parser, Debug)]
#[command(name = "storefront-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file.
    #[arg(short, long, env = "STOREFRONT_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL from the config.
    #[arg(long, env = "STOREFRONT_API_URL", global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default storefront.toml.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },

    /// Log in and store the session.
    Login {
        email: String,
        /// Password (will prompt if not provided).
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log out and clear the stored session.
    Logout,

    /// Show the logged-in user.
    Whoami,

    /// Register a customer account.
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        phone: String,
        /// Date of birth, YYYY-MM-DD.
        #[arg(long)]
        dob: String,
        /// ذكر or أنثى.
        #[arg(long)]
        gender: String,
        #[arg(long, default_value = "")]
        address: String,
        /// Password (will prompt if not provided).
        #[arg(short, long)]
        password: Option<String>,
    },

    /// List books, one page at a time.
    Books {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Defaults to catalog.page_size from the config.
        #[arg(long)]
        page_size: Option<u32>,
        #[arg(short, long)]
        search: Option<String>,
        /// Category id or "all".
        #[arg(long)]
        category: Option<String>,
        /// Author id or "all".
        #[arg(long)]
        author: Option<String>,
    },

    /// Show one book.
    Book { id: i64 },

    /// Landing page: featured books and new releases.
    Home,

    /// Featured books.
    Featured,

    /// New releases.
    NewReleases,

    /// Active categories.
    Categories,

    Authors,

    Publishers,

    /// Ask about a book over WhatsApp.
    Inquire {
        book_id: i64,
        /// User agent deciding the launch plan (iOS opens the app first).
        #[arg(long)]
        user_agent: Option<String>,
        /// Walk through the launch plan, printing each link when due.
        #[arg(long)]
        open: bool,
    },

    /// List recorded inquiries (admin).
    Inquiries {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        page_size: u32,
    },

    /// List quizzes.
    Quizzes {
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        grade: Option<String>,
        #[arg(short, long)]
        search: Option<String>,
        /// Also list the subject and grade options.
        #[arg(long)]
        options: bool,
    },

    /// Report the outcome of a finished quiz.
    QuizResult {
        quiz_id: i64,
        /// Percentage achieved.
        #[arg(long)]
        percentage: f64,
    },

    /// Your quiz attempt history.
    Attempts,

    /// Dashboard counters (admin).
    Stats,

    /// Set a book's stock quantity (admin).
    Stock { id: i64, quantity: i64 },

    /// Upload an image file (admin).
    UploadImage { path: PathBuf },

    /// Delete a book (admin).
    DeleteBook { id: i64 },
}

/// Prints links instead of launching them
struct PrintOpener;

impl LinkOpener for PrintOpener {
    fn open(&self, url: &str) -> storefront_core::Result<()> {
        println!("open: {}", url);
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        match e.downcast_ref::<StorefrontError>() {
            Some(err) => {
                eprintln!("Error: {}", err.user_message());
                if let StorefrontError::ApiRequestFailed { .. } = err {
                    for (field, message) in err.validation_errors().unwrap_or_default() {
                        eprintln!("  {}: {}", field, message);
                    }
                }
            }
            None => eprintln!("Error: {:#}", e),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Command::Init { force } = cli.command {
        return cmd_init(cli.config, force);
    }

    let mut settings = Settings::load_or_default(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        settings.api.base_url = url;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.logging.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let db = Database::new(settings.storage.resolve_path()).await?;
    let session = SessionStore::new(db);
    let client = StorefrontClient::with_config(session, settings.to_client_config())?;

    match cli.command {
        Command::Init { .. } => Ok(()),
        Command::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt_password("Password: ")?,
            };
            let response = client.login(&email, &password).await?;
            match response.user.and_then(|u| u.display_name()) {
                Some(name) => println!("Logged in as {}", name),
                None => println!("Logged in"),
            }
            Ok(())
        }
        Command::Logout => {
            client.logout().await?;
            println!("Logged out");
            Ok(())
        }
        Command::Whoami => cmd_whoami(&client).await,
        Command::Register {
            first_name,
            last_name,
            email,
            username,
            phone,
            dob,
            gender,
            address,
            password,
        } => {
            let (password, confirm_password) = match password {
                Some(p) => (p.clone(), p),
                None => (prompt_password("Password: ")?, prompt_password("Confirm password: ")?),
            };
            let form = RegistrationForm {
                first_name,
                last_name,
                email,
                username,
                password,
                confirm_password,
                phone_number: phone,
                date_of_birth: dob,
                gender,
                address,
            };
            let response = client.register_customer(&form).await?;
            println!(
                "{}",
                response.message.unwrap_or_else(|| "Account created".to_string())
            );
            Ok(())
        }
        Command::Books {
            page,
            page_size,
            search,
            category,
            author,
        } => {
            let query = CatalogQuery {
                page,
                page_size: page_size.unwrap_or(settings.catalog.page_size),
                search_term: search,
                category_id: category,
                author_id: author,
            };
            let mut browser = CatalogBrowser::with_query(client, query);
            browser.load().await?;

            print_books(browser.books());
            let window: Vec<String> = browser
                .page_window()
                .iter()
                .map(|p| {
                    if *p == browser.current_page() {
                        format!("[{}]", p)
                    } else {
                        p.to_string()
                    }
                })
                .collect();
            println!("\nPage {} of {}  {}", browser.current_page(), browser.total_pages(), window.join(" "));
            Ok(())
        }
        Command::Book { id } => {
            let book = client.get_book(id).await?;
            let origin = client.api_origin()?;
            println!("{}", book_title(&book));
            println!("المؤلف: {}", author_name(&book));
            println!("التصنيف: {}", category_name(&book));
            println!("السعر: {}", price_label(&book));
            println!("المخزون: {} ({})", availability_label(&book), book.stock_quantity);
            if let Some(isbn) = &book.isbn {
                println!("ISBN: {}", isbn);
            }
            let image = storefront_core::catalog::display::book_image(&origin, &book);
            if !image.starts_with("data:") {
                println!("Image: {}", image);
            }
            if let Some(desc) = book.description_arabic.as_ref().or(book.description.as_ref()) {
                println!("\n{}", desc);
            }
            Ok(())
        }
        Command::Home => {
            let showcase = HomeShowcase::load(&client).await?;
            println!("Featured ({}):", showcase.featured.len());
            print_books(&showcase.featured);
            println!("\nNew releases ({}):", showcase.new_releases.len());
            print_books(&showcase.new_releases);
            println!("\n{} categories, {} books loaded", showcase.categories.len(), showcase.books.len());
            Ok(())
        }
        Command::Featured => {
            print_books(&client.get_featured_books().await?);
            Ok(())
        }
        Command::NewReleases => {
            print_books(&client.get_new_releases().await?);
            Ok(())
        }
        Command::Categories => {
            for c in client.get_categories().await? {
                println!("{:<6} {}", c.id, c.display_name().unwrap_or("-"));
            }
            Ok(())
        }
        Command::Authors => {
            for a in client.get_authors().await? {
                println!("{:<6} {}", a.id, a.display_name().unwrap_or("-"));
            }
            Ok(())
        }
        Command::Publishers => {
            for p in client.get_publishers().await? {
                let name = p.name_arabic.as_deref().or(p.name.as_deref()).unwrap_or("-");
                println!("{:<6} {}", p.id, name);
            }
            Ok(())
        }
        Command::Inquire {
            book_id,
            user_agent,
            open,
        } => {
            let book = client.get_book(book_id).await?;
            let composer = InquiryComposer::new(client)
                .with_library_phone(settings.whatsapp.library_phone.clone())
                .with_fallback_delay(settings.whatsapp.fallback_delay());
            let inquiry = composer.inquire(&book, user_agent.as_deref()).await?;

            if inquiry.recorded.is_none() {
                println!("(inquiry could not be recorded, link still usable)");
            }
            println!("{}\n", inquiry.message);
            if open {
                inquiry.plan.execute(&PrintOpener).await?;
            } else {
                println!("web: {}", inquiry.links.web_url);
                println!("app: {}", inquiry.links.app_url);
            }
            Ok(())
        }
        Command::Inquiries { page, page_size } => {
            let result = client.get_book_inquiries(page, page_size).await?;
            for i in &result.items {
                println!(
                    "{:<6} {:<8} {:<24} {:<16} {}",
                    i.id.map(|v| v.to_string()).unwrap_or_default(),
                    i.book_id.map(|v| v.to_string()).unwrap_or_default(),
                    i.customer_name.as_deref().unwrap_or("-"),
                    i.customer_phone.as_deref().unwrap_or("-"),
                    i.status.as_deref().unwrap_or("-"),
                );
            }
            println!("\n{} inquiries, page {} of {}", result.total_count, page, result.total_pages(page_size));
            Ok(())
        }
        Command::Quizzes {
            subject,
            grade,
            search,
            options,
        } => {
            let mut board = QuizBoard::new(client);
            board.set_filters(QuizFilters { subject, grade, search }).await?;

            for q in board.visible() {
                println!(
                    "{:<6} {:<40} {:<20} {:<16} {}",
                    q.id,
                    q.title,
                    q.subject.as_deref().unwrap_or("-"),
                    q.grade.as_deref().unwrap_or("-"),
                    if q.is_active { "active" } else { "inactive" },
                );
            }
            if options {
                board.load_options().await;
                println!("\nSubjects: {}", board.options().subjects.join("، "));
                println!("Grades: {}", board.options().grades.join("، "));
            }
            Ok(())
        }
        Command::QuizResult { quiz_id, percentage } => {
            let quiz = client.get_quiz(quiz_id).await?;
            let result = storefront_core::api::QuizResult {
                quiz_id: Some(quiz_id),
                percentage,
                ..Default::default()
            };
            println!("{}", QuizOutcome::from_result(&result, quiz.passing_score).message());
            Ok(())
        }
        Command::Attempts => {
            for a in client.get_my_attempts().await? {
                println!(
                    "{:<32} {:>6.1}%  {}  {}",
                    a.quiz_title.as_deref().unwrap_or("-"),
                    a.percentage,
                    if a.passed(None) { "passed" } else { "failed" },
                    a.completed_at.as_deref().unwrap_or(""),
                );
            }
            Ok(())
        }
        Command::Stats => {
            for (name, value) in client.get_dashboard_stats().await?.counters() {
                println!("{:<24} {}", name, value);
            }
            Ok(())
        }
        Command::Stock { id, quantity } => {
            client.update_book_stock(id, quantity).await?;
            println!("Stock of book {} set to {}", id, quantity);
            Ok(())
        }
        Command::UploadImage { path } => {
            let uploaded = client.upload_image(&path).await?;
            println!("{}", uploaded.url);
            Ok(())
        }
        Command::DeleteBook { id } => {
            client.delete_book(id).await?;
            println!("Deleted book {}", id);
            Ok(())
        }
    }
}

/// Write the default config file.
fn cmd_init(config: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = config.unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));
    Settings::write_default(&path, force)?;
    println!("Created config file: {}", path.display());
    Ok(())
}

async fn cmd_whoami(client: &StorefrontClient) -> anyhow::Result<()> {
    if !client.is_authenticated().await? {
        println!("Not logged in");
        return Ok(());
    }

    match client.current_user().await? {
        Some(user) => {
            println!("{}", user.display_name().unwrap_or_else(|| "-".to_string()));
            if let Some(email) = &user.email {
                println!("Email: {}", email);
            }
            if let Some(role) = user.role_kind() {
                println!("Role: {}", role);
            }
            println!("Admin panel: {}", if client.is_admin().await? { "yes" } else { "no" });
        }
        None => println!("Logged in (no user details stored)"),
    }
    Ok(())
}

fn print_books(books: &[Book]) {
    if books.is_empty() {
        println!("No books found.");
        return;
    }
    for book in books {
        println!(
            "{:<6} {:<40} {:<24} {:<12} {}",
            book.id,
            book_title(book),
            author_name(book),
            price_label(book),
            availability_label(book),
        );
    }
}

fn prompt_password(prompt: &str) -> anyhow::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut password = String::new();
    io::stdin().read_line(&mut password)?;

    Ok(strip_line_ending(&password).to_string())
}

/// Drop the trailing newline only; spaces are part of a password
fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}
