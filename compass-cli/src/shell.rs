//! Interactive session commands

use compass_access::{CompassApplication, LoginRequest, Navigation};
use compass_core::{log_operation_error, log_operation_start, log_operation_success, Role};
use std::ops::ControlFlow;

pub const HELP: &str = "\
Commands:
  login <email> <role> <password>   sign in (any non-empty password)
  logout                            sign out
  whoami                            show the current session
  go <path>                         navigate, e.g. go /student/dashboard
  menu                              sidebar for the signed-in role
  accounts                          demo accounts
  help                              this text
  quit                              leave the shell";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Login {
        email: String,
        role: String,
        password: String,
    },
    Logout,
    WhoAmI,
    Go(String),
    Menu,
    Accounts,
    Help,
    Quit,
    Empty,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(ShellCommand::Empty);
        };
        let mut next = || words.next().unwrap_or_default().to_string();

        match verb {
            "login" => Ok(ShellCommand::Login {
                email: next(),
                role: next(),
                password: next(),
            }),
            "logout" => Ok(ShellCommand::Logout),
            "whoami" => Ok(ShellCommand::WhoAmI),
            "go" | "open" => match next() {
                path if path.is_empty() => Err("usage: go <path>".to_string()),
                path => Ok(ShellCommand::Go(path)),
            },
            "menu" => Ok(ShellCommand::Menu),
            "accounts" => Ok(ShellCommand::Accounts),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            other => Err(format!("unknown command '{}', try 'help'", other)),
        }
    }
}

/// Sign in, echoing what the login form would show
pub async fn login(app: &CompassApplication, request: &LoginRequest) -> String {
    log_operation_start!("login", email = %request.email);
    match app.login(request).await {
        Ok(account) => {
            log_operation_success!("login", account = %account.id);
            format!(
                "Login successful! Welcome back, {}.\n-> {}",
                account.display_string(),
                app.landing_path(account.role)
            )
        }
        Err(e) => {
            log_operation_error!("login", e, email = %request.email);
            e.user_message().to_string()
        }
    }
}

/// What a navigation would put on screen
pub fn describe(path: &str, navigation: &Navigation) -> String {
    match navigation {
        Navigation::Render { page, account } => {
            format!("{} [{}] as {}", page.title, page.path(), account.name)
        }
        Navigation::Public => format!("{}: sign-in form", path),
        Navigation::Redirect(target) => format!("{}: redirected to {}", path, target),
        Navigation::NotFound => format!("{}: 404 page not found", path),
    }
}

/// Run one command against the session
pub async fn execute(app: &CompassApplication, command: ShellCommand) -> ControlFlow<(), String> {
    let output = match command {
        ShellCommand::Login {
            email,
            role,
            password,
        } => {
            let request = LoginRequest {
                email,
                password,
                role: role.parse::<Role>().ok(),
            };
            login(app, &request).await
        }
        ShellCommand::Logout => {
            app.logout().await;
            "Signed out.".to_string()
        }
        ShellCommand::WhoAmI => {
            let snapshot = app.snapshot().await;
            match (snapshot.session.account(), snapshot.authenticated_at) {
                (Some(account), Some(at)) => format!(
                    "{} <{}> since {}",
                    account.display_string(),
                    account.email,
                    at.format("%Y-%m-%d %H:%M:%S UTC")
                ),
                (Some(account), None) => {
                    format!("{} <{}>", account.display_string(), account.email)
                }
                (None, _) => "Not signed in.".to_string(),
            }
        }
        ShellCommand::Go(path) => describe(&path, &app.navigate(&path).await),
        ShellCommand::Menu => {
            let items = app.menu().await;
            if items.is_empty() {
                "Not signed in.".to_string()
            } else {
                items
                    .iter()
                    .map(|item| format!("  {:<12} {}", item.title, item.href))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        ShellCommand::Accounts => accounts_table(app),
        ShellCommand::Help => HELP.to_string(),
        ShellCommand::Quit => return ControlFlow::Break(()),
        ShellCommand::Empty => String::new(),
    };

    ControlFlow::Continue(output)
}

/// Demo Credentials block
pub fn accounts_table(app: &CompassApplication) -> String {
    let rows: String = app
        .demo_credentials()
        .iter()
        .map(|credential| {
            format!(
                "  {:<14} {}\n",
                format!("{}:", credential.role.label()),
                credential.email
            )
        })
        .collect();

    format!("Demo Credentials:\n{}  Password: any value", rows)
}
