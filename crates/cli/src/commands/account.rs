//! Customer account commands.
//!
//! Each command runs in its own session: it signs in, does its work, and
//! signs out again.

use secrecy::SecretString;
use tracing::info;

use borzfuel_core::{Customer, ProfileUpdate};
use borzfuel_storefront::Storefront;
use borzfuel_storefront::ui::RegisterForm;

use super::CliError;

/// Sign-up details from the command line.
pub struct Registration {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub marketing_consent: bool,
}

#[allow(clippy::print_stdout)]
fn print_customer(customer: &Customer) {
    println!("Name:      {}", customer.display_name());
    println!("Email:     {}", customer.email);
    println!("Status:    {}", customer.status());
    println!(
        "Marketing: {}",
        if customer.marketing_consent.unwrap_or(false) {
            "subscribed"
        } else {
            "not subscribed"
        }
    );
}

/// Sign in and print the customer profile.
///
/// # Errors
///
/// Returns an error if sign-in fails or the account is not a customer.
pub async fn login(storefront: &Storefront, email: &str, password: String) -> Result<(), CliError> {
    let session = storefront.session();
    let customer = session.login(email, &SecretString::from(password)).await?;
    print_customer(&customer);
    session.logout().await;
    Ok(())
}

/// Create a customer account and print it.
///
/// # Errors
///
/// Returns an error if the form is invalid (no request is made) or the
/// Account Service refuses the registration.
pub async fn register(storefront: &Storefront, registration: Registration) -> Result<(), CliError> {
    let form = RegisterForm {
        email: registration.email,
        password: SecretString::from(registration.password),
        confirm_password: SecretString::from(registration.confirm_password),
        first_name: registration.first_name,
        last_name: registration.last_name,
        marketing_consent: registration.marketing_consent,
    };
    let request = form.validate()?;

    let session = storefront.session();
    let customer = session.register(&request).await?;
    info!(id = %customer.id, "Customer account created");
    print_customer(&customer);
    session.logout().await;
    Ok(())
}

/// Sign in, apply a profile update, and print the result.
///
/// # Errors
///
/// Returns an error if the update is empty, sign-in fails, or the update is
/// rejected.
pub async fn update_profile(
    storefront: &Storefront,
    email: &str,
    password: String,
    update: ProfileUpdate,
) -> Result<(), CliError> {
    if update.is_empty() {
        return Err(CliError::EmptyUpdate);
    }

    let session = storefront.session();
    session.login(email, &SecretString::from(password)).await?;

    let result = session.update_profile(&update).await;
    session.logout().await;

    print_customer(&result?);
    Ok(())
}
