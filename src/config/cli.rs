use crate::adapters::relay_client::DEFAULT_RELAY_URL;
use crate::domain::model::{Configuration, DoorType, LeadForm, Manufacturer, Quantity, Region};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use clap::{Args, Subcommand};

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Calculate a quote for a single configuration
    Quote(QuoteArgs),
    /// Walk through the configuration steps interactively
    Wizard(WizardArgs),
    /// Calculate a quote and send it as a lead through the relay
    Submit(SubmitArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ConfigurationArgs {
    #[arg(long, default_value = "sliding_double_leaf")]
    pub door_type: DoorType,

    #[arg(long, default_value = "geze")]
    pub manufacturer: Manufacturer,

    /// Number of units; anything that is not a positive integer counts as 1
    #[arg(long, default_value = "1", allow_hyphen_values = true)]
    pub quantity: String,

    /// Opening width in mm
    #[arg(long, default_value = "2000")]
    pub width: u32,

    /// Opening height in mm
    #[arg(long, default_value = "2200")]
    pub height: u32,

    #[arg(long)]
    pub no_battery: bool,

    #[arg(long)]
    pub no_lock: bool,

    #[arg(long)]
    pub no_filling: bool,

    #[arg(long)]
    pub no_painting: bool,

    #[arg(long, default_value = "kazan")]
    pub region: Region,

    #[arg(long)]
    pub no_installation: bool,
}

impl ConfigurationArgs {
    pub fn to_configuration(&self) -> Configuration {
        Configuration {
            door_type: self.door_type,
            manufacturer: self.manufacturer,
            quantity: Quantity::parse(&self.quantity),
            width: self.width,
            height: self.height,
            has_battery: !self.no_battery,
            has_lock: !self.no_lock,
            has_filling: !self.no_filling,
            has_painting: !self.no_painting,
            region: self.region,
            has_installation: !self.no_installation,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct QuoteArgs {
    #[command(flatten)]
    pub configuration: ConfigurationArgs,

    /// Print the breakdown as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct WizardArgs {
    #[arg(long, default_value = DEFAULT_RELAY_URL)]
    pub relay_url: String,
}

#[derive(Debug, Clone, Args)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub configuration: ConfigurationArgs,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub phone: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub comment: Option<String>,

    #[arg(long, default_value = DEFAULT_RELAY_URL)]
    pub relay_url: String,
}

impl SubmitArgs {
    pub fn to_lead(&self) -> LeadForm {
        LeadForm {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            comment: self.comment.clone(),
        }
    }
}

impl Validate for Command {
    fn validate(&self) -> Result<()> {
        match self {
            Command::Quote(_) => Ok(()),
            Command::Wizard(args) => validate_url("relay_url", &args.relay_url),
            Command::Submit(args) => {
                validate_url("relay_url", &args.relay_url)?;
                validate_non_empty_string("name", &args.name)?;
                validate_non_empty_string("phone", &args.phone)?;
                validate_non_empty_string("email", &args.email)?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use clap::Parser;

    #[test]
    fn test_quote_defaults_match_default_configuration() {
        let config = CliConfig::try_parse_from(["door-quote", "quote"]).unwrap();
        match config.command {
            Command::Quote(args) => {
                assert_eq!(args.configuration.to_configuration(), Configuration::default())
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_quote_flags() {
        let config = CliConfig::try_parse_from([
            "door-quote",
            "quote",
            "--door-type",
            "telescopic_one_way",
            "--manufacturer",
            "door_han",
            "--quantity",
            "-5",
            "--no-lock",
            "--region",
            "chelny",
        ])
        .unwrap();

        let Command::Quote(args) = config.command else {
            panic!("expected quote command");
        };
        let configuration = args.configuration.to_configuration();
        assert_eq!(configuration.door_type, DoorType::TelescopicOneWay);
        assert_eq!(configuration.manufacturer, Manufacturer::DoorHan);
        assert_eq!(configuration.quantity, Quantity::ONE);
        assert!(!configuration.has_lock);
        assert!(configuration.has_battery);
        assert_eq!(configuration.region, Region::Chelny);
    }

    #[test]
    fn test_unknown_door_type_is_rejected() {
        assert!(CliConfig::try_parse_from(["door-quote", "quote", "--door-type", "revolving"]).is_err());
    }

    #[test]
    fn test_submit_requires_contact_fields() {
        let config = CliConfig::try_parse_from([
            "door-quote",
            "submit",
            "--name",
            " ",
            "--phone",
            "+7 900",
            "--email",
            "a@b.c",
        ])
        .unwrap();
        assert!(config.validate().is_err());
    }
}
