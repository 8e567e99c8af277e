use tuki_core::{LoginRequest, RegisterRequest, SessionUser};

use crate::app::App;

pub(crate) async fn run_login(app: &App, email: &str, password: &str) -> anyhow::Result<()> {
    let request = LoginRequest::new(email, password)?;
    let user = app.api.login(&request).await?;
    app.session.save_user(&user)?;
    tracing::info!(user_id = user.id, role = %user.role, "logged in");
    println!("{}", welcome(&user));
    Ok(())
}

pub(crate) async fn run_register(
    app: &App,
    name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    let request = RegisterRequest::new(name, email, password)?;
    let user = app.api.register(&request).await?;
    app.session.save_user(&user)?;
    tracing::info!(user_id = user.id, "registered");
    println!("Account created. {}", welcome(&user));
    Ok(())
}

pub(crate) fn run_logout(app: &App) -> anyhow::Result<()> {
    match app.session.current_user() {
        Some(user) => {
            app.session.logout()?;
            println!("Goodbye, {}.", user.name);
        }
        None => println!("No one is logged in."),
    }
    Ok(())
}

fn welcome(user: &SessionUser) -> String {
    if user.is_admin() {
        format!("Welcome, {}. Back-office commands are under `tuki admin`.", user.name)
    } else {
        format!("Welcome, {}.", user.name)
    }
}

#[cfg(test)]
mod tests {
    use tuki_core::Role;

    use super::*;

    #[test]
    fn admins_are_pointed_at_the_back_office() {
        let mut user = SessionUser {
            id: 3,
            name: "Ana".into(),
            email: "ana@tuki.com".into(),
            role: Role::Customer,
            logged_in: true,
        };
        assert_eq!(welcome(&user), "Welcome, Ana.");
        user.role = Role::Admin;
        assert!(welcome(&user).contains("tuki admin"));
    }
}
