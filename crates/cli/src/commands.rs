//! CLI commands

use anyhow::{Context as _, Result, bail};
use chrono::NaiveDate;
use clap::Subcommand;
use clinic_core::{CallbackOutcome, CallbackParams, Location, LoginCallback, MemoryNavigator, Session};
use clinic_http::ClinicClient;
use clinic_http::types::{
    Appointment, AppointmentCreate, AppointmentUpdate, LoginRequest, ProfileUpdate,
    RegisterRequest, TimeSlot, UserProfile,
};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::info;

/// Everything a command needs to talk to the backend
pub struct Context {
    pub client: ClinicClient,
    pub session: Session,
    pub navigator: Arc<MemoryNavigator>,
    pub json: bool,
}

impl Context {
    fn print<T: Serialize>(&self, value: &T, human: impl FnOnce(&T) -> String) -> Result<()> {
        let out = if self.json {
            serde_json::to_string_pretty(value)?
        } else {
            human(value)
        };
        println!("{out}");
        Ok(())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in with email and password
    Login {
        email: String,

        /// Read from stdin when omitted
        #[arg(long, env = "CLINIC_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Create a new account
    Register {
        username: String,
        email: String,

        #[arg(long, env = "CLINIC_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Show the signed-in account
    Whoami,

    /// View or edit the profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Delete the account and sign out
    DeleteAccount {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// List bookable doctors
    Doctors,

    /// Manage appointments
    #[command(alias = "appt")]
    Appointments {
        #[command(subcommand)]
        command: AppointmentCommands,
    },

    /// Print the Google sign-in URL to open in a browser
    GoogleUrl,

    /// Finish a Google sign-in from the URL the browser was sent back to
    Callback {
        /// Full callback URL, e.g. http://localhost:5173/login/callback?token=...
        url: String,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    Show,

    /// Change profile fields; omitted flags stay unchanged
    Update {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        date_of_birth: Option<NaiveDate>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        phone_number: Option<String>,
        #[arg(long)]
        allergies: Option<String>,
        #[arg(long)]
        chronic_conditions: Option<String>,
        #[arg(long)]
        current_medications: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum AppointmentCommands {
    #[command(alias = "ls")]
    List,

    Show { id: i64 },

    /// Book a slot on a date
    Book {
        /// YYYY-MM-DD
        date: NaiveDate,

        /// morning or afternoon
        slot: TimeSlot,

        #[arg(long)]
        doctor: Option<String>,

        #[arg(long)]
        reason: Option<String>,
    },

    /// Move or annotate a booking
    Update {
        id: i64,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        slot: Option<TimeSlot>,
        #[arg(long)]
        doctor: Option<String>,
        #[arg(long)]
        reason: Option<String>,
    },

    #[command(alias = "rm")]
    Cancel { id: i64 },
}

impl Commands {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        match self {
            Commands::Login { email, password } => {
                let password = match password {
                    Some(password) => password,
                    None => prompt("Password: ")?,
                };
                ctx.client
                    .login(LoginRequest { email, password })
                    .await?;
                println!("Signed in.");
                Ok(())
            }
            Commands::Logout => {
                ctx.session
                    .invalidate(clinic_core::InvalidationReason::SignedOut)?;
                println!("Signed out.");
                Ok(())
            }
            Commands::Register {
                username,
                email,
                password,
            } => {
                let password = match password {
                    Some(password) => password,
                    None => prompt("Password: ")?,
                };
                let user = ctx
                    .client
                    .register(RegisterRequest {
                        username,
                        email,
                        password,
                    })
                    .await?;
                info!(user_id = user.id, "Account registered");
                ctx.print(&user, |u| {
                    format!("Registered {} <{}>. Sign in with `clinic login`.", u.username, u.email)
                })
            }
            Commands::Whoami => {
                let me = ctx.client.me().await?;
                ctx.print(&me, |me| format!("{} <{}>", me.display_name(), me.email))
            }
            Commands::Profile { command } => command.execute(ctx).await,
            Commands::DeleteAccount { yes } => {
                if !yes && !confirm("Delete your account and all appointments?")? {
                    bail!("aborted");
                }
                let response = ctx.client.delete_account().await?;
                println!("{}", response.detail);
                Ok(())
            }
            Commands::Doctors => {
                let doctors = ctx.client.list_doctors().await?;
                ctx.print(&doctors, |names| names.join("\n"))
            }
            Commands::Appointments { command } => command.execute(ctx).await,
            Commands::GoogleUrl => {
                println!("{}", ctx.client.google_login_url());
                Ok(())
            }
            Commands::Callback { url } => {
                let location = Location::parse(&url)?;
                let params = CallbackParams::from_location(&location);
                match LoginCallback::complete(params, &ctx.session, ctx.navigator.as_ref()) {
                    CallbackOutcome::Authenticated => {
                        println!("Signed in with Google.");
                        Ok(())
                    }
                    CallbackOutcome::Failed(code) => bail!("Google sign-in failed: {code}"),
                    CallbackOutcome::Missing => {
                        bail!("the URL carries neither a token nor an error")
                    }
                }
            }
        }
    }
}

impl ProfileCommands {
    async fn execute(self, ctx: &Context) -> Result<()> {
        let profile = match self {
            ProfileCommands::Show => ctx.client.me().await?,
            ProfileCommands::Update {
                username,
                email,
                password,
                first_name,
                last_name,
                date_of_birth,
                address,
                phone_number,
                allergies,
                chronic_conditions,
                current_medications,
            } => {
                let update = ProfileUpdate {
                    username,
                    email,
                    password,
                    first_name,
                    last_name,
                    date_of_birth,
                    address,
                    phone_number,
                    allergies,
                    chronic_conditions,
                    current_medications,
                };
                if update == ProfileUpdate::default() {
                    bail!("nothing to update");
                }
                ctx.client.update_profile(update).await?
            }
        };
        ctx.print(&profile, format_profile)
    }
}

impl AppointmentCommands {
    async fn execute(self, ctx: &Context) -> Result<()> {
        match self {
            AppointmentCommands::List => {
                let mut appointments = ctx.client.list_appointments().await?;
                appointments.sort_by_key(|a| (a.appointment_date, a.appointment_time));
                ctx.print(&appointments, |list| {
                    if list.is_empty() {
                        "No appointments booked.".to_string()
                    } else {
                        list.iter().map(format_appointment).collect::<Vec<_>>().join("\n")
                    }
                })
            }
            AppointmentCommands::Show { id } => {
                let appointment = ctx.client.get_appointment(id).await?;
                ctx.print(&appointment, format_appointment)
            }
            AppointmentCommands::Book {
                date,
                slot,
                doctor,
                reason,
            } => {
                let appointment = ctx
                    .client
                    .create_appointment(AppointmentCreate {
                        appointment_date: date,
                        time_slot: slot,
                        reason,
                        doctor_name: doctor,
                    })
                    .await?;
                ctx.print(&appointment, |a| format!("Booked: {}", format_appointment(a)))
            }
            AppointmentCommands::Update {
                id,
                date,
                slot,
                doctor,
                reason,
            } => {
                let update = AppointmentUpdate {
                    appointment_date: date,
                    time_slot: slot,
                    reason,
                    doctor_name: doctor,
                };
                if update == AppointmentUpdate::default() {
                    bail!("nothing to update");
                }
                let appointment = ctx.client.update_appointment(id, update).await?;
                ctx.print(&appointment, format_appointment)
            }
            AppointmentCommands::Cancel { id } => {
                let response = ctx.client.delete_appointment(id).await?;
                println!("{}", response.detail);
                Ok(())
            }
        }
    }
}

fn format_appointment(a: &Appointment) -> String {
    let slot = match a.time_slot {
        TimeSlot::Morning => "morning",
        TimeSlot::Afternoon => "afternoon",
    };
    let mut line = format!(
        "#{:<4} {} {} ({slot})  {}  [{}]",
        a.id,
        a.appointment_date,
        a.appointment_time.format("%H:%M"),
        a.doctor_name,
        a.status
    );
    if let Some(reason) = &a.reason {
        line.push_str("  ");
        line.push_str(reason);
    }
    line
}

fn format_profile(p: &UserProfile) -> String {
    let mut lines = vec![format!("{} <{}>", p.display_name(), p.email)];
    let fields = [
        ("username", Some(p.username.clone())),
        ("date of birth", p.date_of_birth.map(|d| d.to_string())),
        ("phone", p.phone_number.clone()),
        ("address", p.address.clone()),
        ("allergies", p.allergies.clone()),
        ("chronic conditions", p.chronic_conditions.clone()),
        ("medications", p.current_medications.clone()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            lines.push(format!("  {label:<19}{value}"));
        }
    }
    lines.join("\n")
}

fn prompt(message: &str) -> Result<String> {
    eprint!("{message}");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn confirm(question: &str) -> Result<bool> {
    let answer = prompt(&format!("{question} [y/N] "))?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, NaiveTime};

    fn appointment(reason: Option<&str>) -> Appointment {
        let stamp = NaiveDateTime::parse_from_str("2025-03-01 09:15:02", "%Y-%m-%d %H:%M:%S").unwrap();
        Appointment {
            id: 12,
            user_id: Some(1),
            doctor_name: "Dr. Somchai".into(),
            appointment_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            appointment_time: NaiveTime::from_hms_opt(13, 30, 0).unwrap(),
            time_slot: TimeSlot::Afternoon,
            reason: reason.map(Into::into),
            status: "pending".into(),
            created_at: stamp,
            updated_at: stamp,
        }
    }

    #[test]
    fn test_format_appointment() {
        assert_eq!(
            format_appointment(&appointment(None)),
            "#12   2025-03-14 13:30 (afternoon)  Dr. Somchai  [pending]"
        );
        assert!(format_appointment(&appointment(Some("fever"))).ends_with("  fever"));
    }

    #[test]
    fn test_format_profile_skips_missing_fields() {
        let profile = UserProfile {
            id: 1,
            username: "alice01".into(),
            email: "alice@example.com".into(),
            first_name: Some("Alice".into()),
            last_name: Some("Wong".into()),
            date_of_birth: None,
            address: None,
            phone_number: Some("0812345678".into()),
            allergies: None,
            chronic_conditions: None,
            current_medications: None,
        };
        let text = format_profile(&profile);
        assert!(text.starts_with("Alice Wong <alice@example.com>"));
        assert!(text.contains("phone"));
        assert!(!text.contains("allergies"));
    }
}
