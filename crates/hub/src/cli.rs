use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use hub_domain::CollectionId;

#[derive(Parser, Debug)]
#[command(name = "participation-hub")]
#[command(about = "Manage research studies, participant consent and invitations")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Configuration file (defaults to $HUB_CONFIG, then the user config dir)
	#[arg(long, global = true, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Data file overriding the configured one
	#[arg(long, global = true, value_name = "PATH")]
	pub data: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Sign in with email and password
	Login {
		#[arg(long)]
		email: String,
		#[arg(long)]
		password: String,
	},
	/// Sign in through an invitation link
	Accept {
		#[arg(long)]
		email: String,
		#[arg(long)]
		token: String,
	},
	/// Choose a password for an invited account
	Signup {
		#[arg(long)]
		password: String,
		#[arg(long)]
		confirm: String,
	},
	/// Sign out
	Logout,
	/// Show the signed-in account and where it lands
	Whoami,
	/// Collections you participate in
	Collections {
		/// Show only the newest N
		#[arg(long)]
		limit: Option<usize>,
	},
	/// Collections you run as a researcher
	Studies,
	/// Collection details, papers and images
	Show { collection: CollectionId },
	/// Participation counters
	Stats,
	/// Show or change your consent for a collection
	Consent {
		collection: CollectionId,
		#[arg(long, conflicts_with = "revoke")]
		grant: bool,
		#[arg(long)]
		revoke: bool,
	},
	/// Participants of a collection
	Participants { collection: CollectionId },
	/// Invite a comma-separated batch of email addresses
	Invite {
		collection: CollectionId,
		#[arg(long)]
		emails: String,
	},
	/// Compose invitations interactively
	Compose { collection: CollectionId },
	/// Add a published paper to a collection
	AddPaper(AddPaperArgs),
	/// Add an image, referenced by URL, to a collection
	AddImage(AddImageArgs),
	/// Write a demo data set to the data file
	Demo {
		/// Replace an existing data file
		#[arg(long)]
		force: bool,
	},
}

#[derive(Args, Debug)]
pub struct AddPaperArgs {
	pub collection: CollectionId,
	#[arg(long)]
	pub title: String,
	#[arg(long)]
	pub authors: String,
	#[arg(long)]
	pub journal: String,
	#[arg(long)]
	pub description: String,
	/// Publication date, YYYY-MM-DD
	#[arg(long)]
	pub published: String,
	#[arg(long)]
	pub link: String,
}

#[derive(Args, Debug)]
pub struct AddImageArgs {
	pub collection: CollectionId,
	#[arg(long)]
	pub title: String,
	#[arg(long)]
	pub description: String,
	#[arg(long)]
	pub url: String,
}
