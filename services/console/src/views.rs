//! Console views. Each one mirrors a screen of the web front end:
//! it declares its route and allowed roles, asks the guard whether it
//! may render, and only then talks to the backend.

use chrono::Local;

use recrutement::api::analytics::AnalyticsClient;
use recrutement::api::candidatures::{
    temps_ecoule, Candidature, CandidatureClient, CandidatureFilters,
};
use recrutement::api::entretiens::{Entretien, EntretienClient};
use recrutement::api::notifications::NotificationClient;
use recrutement::api::offres::{format_salaire, jours_restants, Offre, OffreClient, OffreFilters};
use recrutement::api::ApiError;
use recrutement::auth::gateway::AuthError;
use recrutement::auth::guard::{decide, RouteAction};
use recrutement::auth::role::Role;
use recrutement::error::AppError;

use crate::cli::{
    AnalyticsCommand, CandidatureCommand, EntretienCommand, LoginArgs, NotificationCommand,
    OffreCommand, RegisterArgs,
};
use crate::infra::App;

/// Runs the guard for a view. A denied view prints where the shell
/// would have navigated and reports `false`.
fn enter(app: &App, requested_path: &str, allowed_roles: &[Role]) -> bool {
    match decide(&app.session.current(), requested_path, allowed_roles) {
        RouteAction::Render => true,
        RouteAction::ShowLoader => {
            println!("Session en cours de chargement, réessayez.");
            false
        }
        RouteAction::Redirect { to, resume } => {
            match resume {
                Some(from) => println!(
                    "Connexion requise pour {from} ; lancez `recrutement-console login` (retour prévu vers {from})."
                ),
                None => println!("Accès refusé ici ; votre espace est {to}."),
            }
            false
        }
    }
}

/// Folds the one global API policy into console output: a 401 already
/// dropped the session, so tell the user to sign in again instead of
/// failing the process.
fn finish(result: Result<(), ApiError>) -> Result<(), AppError> {
    match result {
        Ok(()) => Ok(()),
        Err(ApiError::Unauthorized) => {
            println!("Session expirée ; reconnectez-vous avec `recrutement-console login`.");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

pub(crate) async fn login(app: &App, args: LoginArgs) -> Result<(), AppError> {
    match app.auth.login(&args.email, &args.password).await {
        Ok(user) => {
            println!(
                "Connecté en tant que {} ({}).",
                user.full_name(),
                user.role.label()
            );
            println!("Espace : {}", user.role.landing_path());
            Ok(())
        }
        Err(AuthError::Rejected { message }) => {
            println!("Échec de la connexion : {message}");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

pub(crate) async fn register(app: &App, args: RegisterArgs) -> Result<(), AppError> {
    let request = recrutement::auth::gateway::RegisterRequest {
        nom: args.nom,
        prenom: args.prenom,
        email: args.email,
        password: args.password,
        telephone: args.telephone,
        role: Role::normalize(Some(&args.role)),
    };

    match app.auth.register(request).await {
        Ok(user) => {
            println!(
                "Compte créé ; connecté en tant que {} ({}).",
                user.full_name(),
                user.role.label()
            );
            Ok(())
        }
        Err(AuthError::Rejected { message }) => {
            println!("Échec de l'inscription : {message}");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

pub(crate) fn logout(app: &App) -> Result<(), AppError> {
    app.auth.logout()?;
    println!("Session supprimée.");
    Ok(())
}

pub(crate) fn session(app: &App) -> Result<(), AppError> {
    let session = app.session.current();
    println!("API : {}", app.config.api.base_url);
    match &session.user {
        Some(user) => {
            println!("Connecté : {} <{}>", user.full_name(), user.email);
            println!("Rôle : {} ({})", user.role.label(), user.role.as_str());
            println!("Espace : {}", user.role.landing_path());
        }
        None => println!("Aucune session ; lancez `recrutement-console login`."),
    }
    Ok(())
}

pub(crate) async fn dashboard(app: &App) -> Result<(), AppError> {
    if !enter(app, "/dashboard", &[Role::Recruteur]) {
        return Ok(());
    }
    finish(render_dashboard(app).await)
}

async fn render_dashboard(app: &App) -> Result<(), ApiError> {
    let stats = AnalyticsClient::new(app.api.clone()).dashboard_stats().await?;
    println!("Tableau de bord");
    println!(
        "  Offres        : {} (dont {} publiées)",
        stats.total_offres, stats.offres_publiees
    );
    println!(
        "  Candidatures  : {} ({} récentes)",
        stats.total_candidatures, stats.candidatures_recentes
    );
    println!(
        "  Entretiens    : {} ({} à venir)",
        stats.total_entretiens, stats.entretiens_a_venir
    );
    println!("  Candidats     : {}", stats.total_candidats);
    println!("  Taux de conversion : {:.1} %", stats.taux_conversion);
    println!(
        "  Temps moyen de recrutement : {:.1} j",
        stats.temps_moyen_recrutement
    );
    Ok(())
}

pub(crate) async fn offres(app: &App, command: OffreCommand) -> Result<(), AppError> {
    if !enter(app, "/offres", &[Role::Recruteur]) {
        return Ok(());
    }
    finish(render_offres(app, command).await)
}

async fn render_offres(app: &App, command: OffreCommand) -> Result<(), ApiError> {
    let client = OffreClient::new(app.api.clone());
    match command {
        OffreCommand::List(args) => {
            let offres = if args.mine {
                client.mes_offres().await?
            } else if args.statut.is_none()
                && args.type_contrat.is_none()
                && args.localisation.is_none()
            {
                client.list().await?
            } else {
                client
                    .filter(&OffreFilters {
                        statut: args.statut,
                        type_contrat: args.type_contrat,
                        localisation: args.localisation,
                        ..OffreFilters::default()
                    })
                    .await?
            };
            print_offres(&offres);
        }
        OffreCommand::Show { id } => print_offre(&client.get(&id).await?),
        OffreCommand::Search {
            keyword,
            page,
            size,
        } => {
            let result = client.search(&keyword, page, size).await?;
            println!(
                "{} résultat(s), page {}/{}",
                result.total_elements,
                result.number + 1,
                result.total_pages.max(1)
            );
            print_offres(&result.content);
        }
        OffreCommand::Publier { id } => {
            let offre = client.publier(&id).await?;
            println!("Offre {} → {}", offre.id, offre.statut.label());
        }
        OffreCommand::Archiver { id } => {
            let offre = client.archiver(&id).await?;
            println!("Offre {} → {}", offre.id, offre.statut.label());
        }
        OffreCommand::Pourvue { id } => {
            let offre = client.marquer_pourvue(&id).await?;
            println!("Offre {} → {}", offre.id, offre.statut.label());
        }
        OffreCommand::Stats => {
            let counts = client.count_by_statut().await?;
            let mut entries: Vec<_> = counts.into_iter().collect();
            entries.sort();
            for (statut, count) in entries {
                println!("  {statut:<12} {count}");
            }
        }
    }
    Ok(())
}

fn print_offres(offres: &[Offre]) {
    if offres.is_empty() {
        println!("Aucune offre.");
        return;
    }
    for offre in offres {
        println!(
            "{}  {}  [{}]  {}  {}",
            offre.id,
            offre.titre,
            offre.statut.label(),
            offre
                .type_contrat
                .map(|contrat| contrat.label())
                .unwrap_or("—"),
            offre.localisation.as_deref().unwrap_or("—"),
        );
    }
}

fn print_offre(offre: &Offre) {
    println!("{} — {}", offre.id, offre.titre);
    println!("  Statut       : {}", offre.statut.label());
    if let Some(contrat) = offre.type_contrat {
        println!("  Contrat      : {}", contrat.label());
    }
    if let Some(localisation) = &offre.localisation {
        println!("  Lieu         : {}", localisation);
    }
    println!(
        "  Salaire      : {}",
        format_salaire(
            offre.salaire_min,
            offre.salaire_max,
            offre.devise_monnaie.as_deref().unwrap_or("EUR"),
        )
    );
    println!(
        "  Candidatures : {} ({} vues)",
        offre.nombre_candidatures, offre.nombre_vues
    );
    if let Some(expiration) = offre.date_expiration {
        let restants = jours_restants(expiration, Local::now().naive_local());
        println!("  Expire dans  : {restants} j");
    }
    if let Some(description) = &offre.description {
        println!("  {description}");
    }
}

pub(crate) async fn candidatures(app: &App, command: CandidatureCommand) -> Result<(), AppError> {
    if !enter(app, "/candidatures", &[Role::Recruteur]) {
        return Ok(());
    }
    finish(render_candidatures(app, command).await)
}

async fn render_candidatures(app: &App, command: CandidatureCommand) -> Result<(), ApiError> {
    let client = CandidatureClient::new(app.api.clone());
    match command {
        CandidatureCommand::List(args) => {
            let candidatures = if args.offre.is_none() && args.statut.is_none() && args.score_min.is_none() {
                client.list().await?
            } else {
                client
                    .filter(&CandidatureFilters {
                        offre_id: args.offre,
                        statut: args.statut,
                        score_min: args.score_min,
                    })
                    .await?
            };
            print_candidatures(&candidatures);
        }
        CandidatureCommand::Show { id } => {
            let candidature = client.get(&id).await?;
            print_candidature(&candidature);
        }
        CandidatureCommand::Recentes { limit } => {
            print_candidatures(&client.recent(limit).await?);
        }
        CandidatureCommand::Statut {
            id,
            statut,
            commentaire,
        } => {
            let candidature = client.changer_statut(&id, statut, &commentaire).await?;
            println!(
                "Candidature {} → {}",
                candidature.id,
                candidature.statut.label()
            );
        }
        CandidatureCommand::Commenter { id, contenu, prive } => {
            let candidature = client.ajouter_commentaire(&id, &contenu, prive).await?;
            println!(
                "Commentaire ajouté ({} au total).",
                candidature.commentaires.len()
            );
        }
    }
    Ok(())
}

fn print_candidatures(candidatures: &[Candidature]) {
    if candidatures.is_empty() {
        println!("Aucune candidature.");
        return;
    }
    let now = Local::now().naive_local();
    for candidature in candidatures {
        let candidat = format!(
            "{} {}",
            candidature.candidat_prenom.as_deref().unwrap_or(""),
            candidature.candidat_nom.as_deref().unwrap_or("?"),
        );
        let recency = candidature
            .date_postulation
            .map(|date| temps_ecoule(date, now))
            .unwrap_or_else(|| "—".to_string());
        println!(
            "{}  {}  → {}  [{}]  score {}  ({recency})",
            candidature.id,
            candidat.trim(),
            candidature.offre_titre.as_deref().unwrap_or("?"),
            candidature.statut.label(),
            candidature.score_matching,
        );
    }
}

fn print_candidature(candidature: &Candidature) {
    println!(
        "{} — {} {}",
        candidature.id,
        candidature.candidat_prenom.as_deref().unwrap_or(""),
        candidature.candidat_nom.as_deref().unwrap_or("?"),
    );
    println!("  Offre   : {}", candidature.offre_titre.as_deref().unwrap_or("?"));
    println!("  Statut  : {}", candidature.statut.label());
    println!("  Score   : {}", candidature.score_matching);
    println!("  Source  : {}", candidature.source.label());
    if !candidature.historique.is_empty() {
        println!("  Historique :");
        for entry in &candidature.historique {
            println!(
                "    → {}{}",
                entry.nouveau_statut.label(),
                entry
                    .commentaire
                    .as_deref()
                    .map(|commentaire| format!(" ({commentaire})"))
                    .unwrap_or_default(),
            );
        }
    }
    if !candidature.commentaires.is_empty() {
        println!("  Commentaires :");
        for commentaire in &candidature.commentaires {
            println!(
                "    {} : {}",
                commentaire.auteur_nom.as_deref().unwrap_or("?"),
                commentaire.contenu
            );
        }
    }
}

pub(crate) async fn entretiens(app: &App, command: EntretienCommand) -> Result<(), AppError> {
    if !enter(app, "/entretiens", &[Role::Recruteur, Role::Interviewer]) {
        return Ok(());
    }
    finish(render_entretiens(app, command).await)
}

async fn render_entretiens(app: &App, command: EntretienCommand) -> Result<(), ApiError> {
    let client = EntretienClient::new(app.api.clone());
    match command {
        EntretienCommand::Aujourdhui => print_entretiens(&client.aujourdhui().await?),
        EntretienCommand::AVenir => print_entretiens(&client.a_venir().await?),
        EntretienCommand::Candidat { id } => {
            for item in client.by_candidat(&id).await? {
                println!(
                    "{}  {}  pour {}  [{}]",
                    item.entretien.id,
                    item.entretien.type_entretien.label(),
                    item.candidature.offre_titre.as_deref().unwrap_or("?"),
                    item.entretien.statut.label(),
                );
            }
        }
        EntretienCommand::Statut { id, statut } => {
            let entretien = client.changer_statut(&id, statut).await?;
            println!("Entretien {} → {}", entretien.id, entretien.statut.label());
        }
    }
    Ok(())
}

fn print_entretiens(entretiens: &[Entretien]) {
    if entretiens.is_empty() {
        println!("Aucun entretien.");
        return;
    }
    for entretien in entretiens {
        let quand = entretien
            .date_debut
            .map(|date| date.format("%d/%m/%Y %H:%M").to_string())
            .unwrap_or_else(|| "—".to_string());
        println!(
            "{}  {}  {}  {} {}  [{}]",
            entretien.id,
            quand,
            entretien.type_entretien.label(),
            entretien.candidat_prenom.as_deref().unwrap_or(""),
            entretien.candidat_nom.as_deref().unwrap_or("?"),
            entretien.statut.label(),
        );
    }
}

pub(crate) async fn notifications(app: &App, command: NotificationCommand) -> Result<(), AppError> {
    if !enter(app, "/notifications", &[Role::Recruteur]) {
        return Ok(());
    }
    finish(render_notifications(app, command).await)
}

async fn render_notifications(app: &App, command: NotificationCommand) -> Result<(), ApiError> {
    let client = NotificationClient::new(app.api.clone());
    match command {
        NotificationCommand::Recentes => {
            let notifications = client.recent().await?;
            if notifications.is_empty() {
                println!("Aucune notification.");
            }
            for notification in notifications {
                println!(
                    "{}  {}  → {}  [{}]",
                    notification.id,
                    notification.type_notification.label(),
                    notification.destinataire.as_deref().unwrap_or("?"),
                    notification
                        .statut
                        .map(|statut| statut.label())
                        .unwrap_or("—"),
                );
            }
        }
        NotificationCommand::Stats => {
            let stats = client.statistics().await?;
            println!("{}", serde_json::to_string_pretty(&stats).unwrap_or_default());
        }
        NotificationCommand::Test { email, nom } => {
            client.send_test(&email, &nom).await?;
            println!("Notification de test envoyée à {email}.");
        }
    }
    Ok(())
}

pub(crate) async fn analytics(app: &App, command: AnalyticsCommand) -> Result<(), AppError> {
    if !enter(app, "/analytics", &[Role::Recruteur]) {
        return Ok(());
    }
    finish(render_analytics(app, command).await)
}

async fn render_analytics(app: &App, command: AnalyticsCommand) -> Result<(), ApiError> {
    let client = AnalyticsClient::new(app.api.clone());
    match command {
        AnalyticsCommand::Evolution => {
            for mois in client.evolution_candidatures().await? {
                println!(
                    "{}  total {}  acceptées {}  refusées {}",
                    mois.mois, mois.total, mois.acceptees, mois.refusees
                );
            }
        }
        AnalyticsCommand::Statuts => {
            for entry in client.repartition_par_statut().await? {
                println!("  {:<20} {}", entry.cle, entry.nombre);
            }
        }
        AnalyticsCommand::TopOffres => {
            for offre in client.top_offres().await? {
                println!(
                    "{}  {}  {} candidature(s), {} vue(s), conversion {:.1} %",
                    offre.id,
                    offre.titre,
                    offre.nombre_candidatures,
                    offre.nombre_vues,
                    offre.taux_conversion,
                );
            }
        }
        AnalyticsCommand::Sources => {
            for entry in client.sources_candidatures().await? {
                println!("  {:<20} {}", entry.cle, entry.nombre);
            }
        }
        AnalyticsCommand::Scores => {
            let mut entries: Vec<_> = client.distribution_scores().await?.into_iter().collect();
            entries.sort();
            for (tranche, nombre) in entries {
                println!("  {tranche:<12} {nombre}");
            }
        }
    }
    Ok(())
}
