use clap::Subcommand;
use studyhall_core::api::{SignIn, SignUp, UserRecord};
use studyhall_core::{Config, UserSession};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Create an account
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long, env = "STUDYHALL_PASSWORD", hide_env_values = true)]
        password: String,
        /// Freshman, Sophomore, Junior, Senior or Graduate
        #[arg(long)]
        year: String,
        #[arg(long)]
        major: String,
    },
    /// Sign in to an existing account
    Signin {
        #[arg(long)]
        username: String,
        #[arg(long, env = "STUDYHALL_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Show the remembered user
    Whoami {
        /// Fetch the latest record from the backend
        #[arg(long)]
        refresh: bool,
    },
    /// Forget the remembered user
    Signout,
}

pub async fn run(action: AuthAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let session = UserSession::open()?;
    match action {
        AuthAction::Signup {
            username,
            password,
            year,
            major,
        } => {
            let form = SignUp {
                username,
                password,
                year,
                major,
            };
            let user = super::client(config)?.sign_up(&form).await?;
            remember(config, &session, &user)?;
            println!("welcome, {}!", user.username);
        }
        AuthAction::Signin { username, password } => {
            let user = super::client(config)?
                .sign_in(&SignIn { username, password })
                .await?;
            remember(config, &session, &user)?;
            println!("signed in as {}", user.username);
        }
        AuthAction::Whoami { refresh } => match session.load()? {
            Some(user) => {
                let user = if refresh {
                    let fresh = super::client(config)?.get_user(&user.username).await?;
                    remember(config, &session, &fresh)?;
                    fresh
                } else {
                    user
                };
                println!("{}", describe(&user));
            }
            None => println!("not signed in"),
        },
        AuthAction::Signout => {
            session.clear()?;
            println!("signed out");
        }
    }
    Ok(())
}

fn remember(config: &Config, session: &UserSession, user: &UserRecord) -> Result<(), Box<dyn std::error::Error>> {
    if config.auth.remember_user {
        session.save(user)?;
        tracing::debug!(path = %session.path().display(), "remembered user");
    }
    Ok(())
}

fn describe(user: &UserRecord) -> String {
    let mut out = user.username.clone();
    let profile: Vec<&str> = [user.year.as_str(), user.major.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if !profile.is_empty() {
        out.push_str(&format!(" ({})", profile.join(", ")));
    }
    if !user.last_login.is_empty() {
        out.push_str(&format!("\nlast login: {}", user.last_login));
    }
    out
}
