use anyhow::Result;
use calrem_core::session::Auth;
use owo_colors::OwoColorize;

use crate::app::App;
use crate::utils::prompt;
use crate::utils::tui::create_spinner;

pub async fn register(app: &App, username: Option<String>) -> Result<()> {
    let username = match username {
        Some(u) => u,
        None => prompt::username()?,
    };
    let password = prompt::password("  Password")?;
    let confirm = prompt::password("  Confirm password")?;

    let spinner = create_spinner("Registering...");
    let result = Auth::new(app.store.as_ref())
        .register(&username, &password, &confirm)
        .await;
    spinner.finish_and_clear();

    let session = result?;
    app.session.save(&session)?;
    println!("{}", format!("Registered and logged in as {}", session.username).green());
    Ok(())
}

pub async fn login(app: &App, username: Option<String>) -> Result<()> {
    let username = match username {
        Some(u) => u,
        None => prompt::username()?,
    };
    let password = prompt::password("  Password")?;

    let spinner = create_spinner("Logging in...");
    let result = Auth::new(app.store.as_ref()).login(&username, &password).await;
    spinner.finish_and_clear();

    let session = result?;
    app.session.save(&session)?;
    println!("{}", format!("Logged in as {}", session.username).green());
    Ok(())
}

pub fn logout(app: &App) -> Result<()> {
    if app.session.clear()? {
        println!("Logged out");
    } else {
        println!("{}", "Not logged in".dimmed());
    }
    Ok(())
}

pub fn whoami(app: &App) -> Result<()> {
    match app.session.load()? {
        Some(session) => println!("{}", session.username),
        None => println!("{}", "Not logged in".dimmed()),
    }
    Ok(())
}
