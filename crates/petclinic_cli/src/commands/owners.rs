//! Owners command
//!
//! Usage: petclinic owners <find|show|add|update> ...

use super::{print_json, Service};
use clap::{Args, Subcommand};
use log::info;
use petclinic_core::{Owner, OwnerId};

#[derive(Debug, Args)]
pub struct OwnersArgs {
    #[command(subcommand)]
    pub command: OwnersCommand,
}

#[derive(Debug, Subcommand)]
pub enum OwnersCommand {
    /// Find owners whose last name starts with a prefix
    Find(FindOwnersArgs),
    /// Show one owner with pets and visits
    Show(ShowOwnerArgs),
    /// Register a new owner
    Add(AddOwnerArgs),
    /// Change contact details of an existing owner
    Update(UpdateOwnerArgs),
}

#[derive(Debug, Args)]
pub struct FindOwnersArgs {
    /// Last-name prefix (all owners when omitted)
    #[arg(default_value = "")]
    pub last_name: String,
}

#[derive(Debug, Args)]
pub struct ShowOwnerArgs {
    pub id: OwnerId,
}

#[derive(Debug, Args)]
pub struct AddOwnerArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub city: String,
    /// Up to 10 digits
    #[arg(long)]
    pub telephone: String,
}

#[derive(Debug, Args)]
pub struct UpdateOwnerArgs {
    pub id: OwnerId,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub telephone: Option<String>,
}

impl UpdateOwnerArgs {
    /// Overwrites the fields given on the command line, keeping the rest.
    fn apply_to(self, owner: &mut Owner) {
        let fields = [
            (self.first_name, &mut owner.first_name),
            (self.last_name, &mut owner.last_name),
            (self.address, &mut owner.address),
            (self.city, &mut owner.city),
            (self.telephone, &mut owner.telephone),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

/// Execute owners command
pub fn execute(service: &Service<'_>, args: OwnersArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        OwnersCommand::Find(find_args) => {
            let owners = service.find_owners(&find_args.last_name)?;
            print_json(&owners)
        }
        OwnersCommand::Show(show_args) => {
            let owner = service.owner(show_args.id)?;
            print_json(&owner)
        }
        OwnersCommand::Add(add_args) => {
            let mut owner = Owner::new(
                add_args.first_name,
                add_args.last_name,
                add_args.address,
                add_args.city,
                add_args.telephone,
            );
            let id = service.register_owner(&mut owner)?;
            info!("event=cli_owner_add module=cli status=ok owner_id={id}");
            print_json(&owner)
        }
        OwnersCommand::Update(update_args) => {
            let mut owner = service.owner(update_args.id)?;
            update_args.apply_to(&mut owner);
            service.update_owner(&mut owner)?;
            info!(
                "event=cli_owner_update module=cli status=ok owner_id={}",
                owner.id.unwrap_or_default()
            );
            print_json(&owner)
        }
    }
}
