use clap::{Args, Parser, Subcommand};

use recrutement::api::candidatures::StatutCandidature;
use recrutement::api::entretiens::StatutEntretien;
use recrutement::api::offres::{StatutOffre, TypeContrat};
use recrutement::error::AppError;

use crate::infra::{parse_wire_enum, App};
use crate::views;

#[derive(Parser, Debug)]
#[command(
    name = "Recrutement Console",
    about = "Drive the recruitment platform (offers, candidacies, interviews) from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and persist the session
    Login(LoginArgs),
    /// Create an account and sign in
    Register(RegisterArgs),
    /// Drop the persisted session
    Logout,
    /// Show the current session (default command)
    #[command(alias = "whoami")]
    Session,
    /// Recruiter dashboard with headline metrics
    Dashboard,
    /// Job offer management
    Offres {
        #[command(subcommand)]
        command: OffreCommand,
    },
    /// Candidacy pipeline
    Candidatures {
        #[command(subcommand)]
        command: CandidatureCommand,
    },
    /// Interview planning
    Entretiens {
        #[command(subcommand)]
        command: EntretienCommand,
    },
    /// Notification history
    Notifications {
        #[command(subcommand)]
        command: NotificationCommand,
    },
    /// Recruiting analytics
    Analytics {
        #[command(subcommand)]
        command: AnalyticsCommand,
    },
}

#[derive(Args, Debug)]
pub(crate) struct LoginArgs {
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long)]
    pub(crate) password: String,
}

#[derive(Args, Debug)]
pub(crate) struct RegisterArgs {
    #[arg(long)]
    pub(crate) nom: String,
    #[arg(long)]
    pub(crate) prenom: String,
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long)]
    pub(crate) password: String,
    #[arg(long)]
    pub(crate) telephone: Option<String>,
    /// Account role; unknown values fall back to RECRUTEUR
    #[arg(long, default_value = "CANDIDAT")]
    pub(crate) role: String,
}

#[derive(Subcommand, Debug)]
pub(crate) enum OffreCommand {
    /// List offers, optionally filtered
    List(OffreListArgs),
    /// Show one offer in full
    Show { id: String },
    /// Full-text search over published offers
    Search {
        keyword: String,
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
    },
    /// Publish a draft offer
    Publier { id: String },
    /// Archive an offer
    Archiver { id: String },
    /// Mark an offer as filled
    Pourvue { id: String },
    /// Offer counts per status
    Stats,
}

#[derive(Args, Debug)]
pub(crate) struct OffreListArgs {
    #[arg(long, value_parser = parse_wire_enum::<StatutOffre>)]
    pub(crate) statut: Option<StatutOffre>,
    #[arg(long, value_parser = parse_wire_enum::<TypeContrat>)]
    pub(crate) type_contrat: Option<TypeContrat>,
    #[arg(long)]
    pub(crate) localisation: Option<String>,
    /// Only the authenticated recruiter's offers
    #[arg(long)]
    pub(crate) mine: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum CandidatureCommand {
    /// List candidacies, optionally filtered
    List(CandidatureListArgs),
    /// Show one candidacy with its history
    Show { id: String },
    /// Most recent candidacies
    Recentes {
        #[arg(long, default_value_t = 5)]
        limit: u32,
    },
    /// Move a candidacy to a new pipeline stage
    Statut {
        id: String,
        #[arg(long, value_parser = parse_wire_enum::<StatutCandidature>)]
        statut: StatutCandidature,
        #[arg(long, default_value = "")]
        commentaire: String,
    },
    /// Attach a recruiter note
    Commenter {
        id: String,
        #[arg(long)]
        contenu: String,
        #[arg(long)]
        prive: bool,
    },
}

#[derive(Args, Debug)]
pub(crate) struct CandidatureListArgs {
    #[arg(long)]
    pub(crate) offre: Option<String>,
    #[arg(long, value_parser = parse_wire_enum::<StatutCandidature>)]
    pub(crate) statut: Option<StatutCandidature>,
    #[arg(long)]
    pub(crate) score_min: Option<i32>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum EntretienCommand {
    /// Interviews scheduled today
    Aujourdhui,
    /// Upcoming interviews
    AVenir,
    /// Interviews of one candidate, joined with their candidacies
    Candidat { id: String },
    /// Move an interview to a new status
    Statut {
        id: String,
        #[arg(long, value_parser = parse_wire_enum::<StatutEntretien>)]
        statut: StatutEntretien,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum NotificationCommand {
    /// Latest notifications
    Recentes,
    /// Dispatch counters
    Stats,
    /// Send a test email
    Test {
        #[arg(long)]
        email: String,
        #[arg(long)]
        nom: String,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum AnalyticsCommand {
    /// 12-month candidacy evolution
    Evolution,
    /// Candidacies per pipeline stage
    Statuts,
    /// Offers attracting the most candidacies
    TopOffres,
    /// Candidacy sources
    Sources,
    /// Matching score distribution
    Scores,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Session);
    let app = App::init()?;

    match command {
        Command::Login(args) => views::login(&app, args).await,
        Command::Register(args) => views::register(&app, args).await,
        Command::Logout => views::logout(&app),
        Command::Session => views::session(&app),
        Command::Dashboard => views::dashboard(&app).await,
        Command::Offres { command } => views::offres(&app, command).await,
        Command::Candidatures { command } => views::candidatures(&app, command).await,
        Command::Entretiens { command } => views::entretiens(&app, command).await,
        Command::Notifications { command } => views::notifications(&app, command).await,
        Command::Analytics { command } => views::analytics(&app, command).await,
    }
}
