use anyhow::{bail, Context};
use clap::Parser;
use doc_intake::backend::{HttpBackend, IntakeBackend};
use doc_intake::cli::{Cli, Commands, DriveAction};
use doc_intake::config::Config;
use doc_intake::error::IntakeError;
use doc_intake::intake::{
    AnalysisCoordinator, AnalysisOutcome, CommitCoordinator, CommitOutcome, DriveAffordance,
    FileCandidate, IntakeSession, IntakeState, SystemClock,
};
use doc_intake::render::{print_view, TerminalRenderer};
use doc_intake::review::{self, ReviewAction};
use doc_intake::{logging, scanner};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let mut config = Config::load()?;

    if let Commands::Config { set_backend_url, set_dismiss_after, show } = &cli.command {
        if let Some(url) = set_backend_url {
            config.set_backend_url(url.clone())?;
            config.save()?;
            println!("✔ Backend URL set: {}", config.backend_url);
        }

        if let Some(secs) = set_dismiss_after {
            config.set_dismiss_after_secs(*secs)?;
            config.save()?;
            println!("✔ Notification dwell set: {}s", secs);
        }

        if *show {
            println!("Config:");
            println!("  backend_url: {}", config.backend_url);
            println!("  effective backend: {}", config.backend_url());
            println!("  dismiss_after_secs: {}", config.dismiss_after_secs);
            println!("  path: {}", Config::config_path()?.display());
        }
        return Ok(());
    }

    let backend_url = cli.backend_url.clone().unwrap_or_else(|| config.backend_url());
    let backend = HttpBackend::new(backend_url.clone())?;
    let state = IntakeState::new(Arc::new(SystemClock::new()), config.dismiss_after());
    let mut session = IntakeSession::new(backend, state);
    let mut renderer = TerminalRenderer::new();

    match cli.command {
        Commands::Analyze { file } => {
            let candidate = read_candidate(&file)?;
            let outcome = analyze_with_progress(&mut session, &mut renderer, candidate).await?;
            print_view(&session.state().view);
            match outcome {
                AnalysisOutcome::Analyzed(_) | AnalysisOutcome::Stale => {}
                AnalysisOutcome::RateLimited => bail!(IntakeError::RateLimited),
                AnalysisOutcome::Failed(e) => bail!(e),
            }
        }

        Commands::Process { path, name, yes } => {
            let Some(file) = resolve_document(&path)? else {
                println!("Cancelled");
                return Ok(());
            };
            session.refresh_drive().await;
            print_drive(session.state().view.drive, &backend_url);

            let candidate = read_candidate(&file)?;
            let outcome = analyze_with_progress(&mut session, &mut renderer, candidate).await?;
            print_view(&session.state().view);
            if matches!(outcome, AnalysisOutcome::RateLimited) && yes && name.is_none() {
                bail!(IntakeError::RateLimited);
            }

            process_save(&mut session, &mut renderer, name, yes).await?;
        }

        Commands::Drive { action } => {
            if action == DriveAction::Disconnect {
                let result = session.disconnect_drive().await;
                renderer.render(&session.state().notifications);
                if result.is_ok() {
                    println!("✔ Drive disconnected");
                }
                print_drive(session.state().view.drive, &backend_url);
                result?;
            } else {
                session.refresh_drive().await;
                print_drive(session.state().view.drive, &backend_url);
            }
        }

        Commands::Config { .. } => unreachable!("handled above"),
    }

    Ok(())
}

fn read_candidate(path: &Path) -> anyhow::Result<FileCandidate> {
    FileCandidate::from_path(path).with_context(|| format!("read {}", path.display()))
}

/// フォルダなら一覧から選ばせる
fn resolve_document(path: &Path) -> anyhow::Result<Option<PathBuf>> {
    if !path.is_dir() {
        return Ok(Some(path.to_path_buf()));
    }

    let documents = scanner::scan_folder(path)?;
    if documents.is_empty() {
        bail!("No PDF/PNG/JPG documents in {}", path.display());
    }
    Ok(review::pick_document(&documents)?.map(|d| d.path.clone()))
}

async fn analyze_with_progress<B: IntakeBackend>(
    session: &mut IntakeSession<B>,
    renderer: &mut TerminalRenderer,
    candidate: FileCandidate,
) -> Result<AnalysisOutcome, IntakeError> {
    let file = match session.select(candidate) {
        Ok(file) => file,
        Err(e) => {
            renderer.render(&session.state().notifications);
            return Err(e);
        }
    };

    let (backend, state) = session.parts();
    let coordinator = AnalysisCoordinator::new(backend);
    let ticket = coordinator.begin(state, file);
    let response = renderer
        .while_pending(&state.notifications, coordinator.request(&ticket))
        .await;
    let outcome = coordinator.finish(state, ticket, response);
    renderer.render(&state.notifications);
    Ok(outcome)
}

async fn save_with_progress<B: IntakeBackend>(
    session: &mut IntakeSession<B>,
    renderer: &mut TerminalRenderer,
    user_name: &str,
) -> CommitOutcome {
    let (backend, state) = session.parts();
    let coordinator = CommitCoordinator::new(backend);
    let ticket = match coordinator.prepare(state, user_name) {
        Ok(ticket) => ticket,
        Err(e) => {
            renderer.render(&state.notifications);
            return CommitOutcome::Rejected(e);
        }
    };
    let response = renderer
        .while_pending(&state.notifications, coordinator.request(&ticket))
        .await;
    let outcome = coordinator.finish(state, ticket, response).await;
    renderer.render(&state.notifications);
    outcome
}

/// 名前確認と保存。失敗時は解析結果を保ったまま再試行できる
async fn process_save<B: IntakeBackend>(
    session: &mut IntakeSession<B>,
    renderer: &mut TerminalRenderer,
    name: Option<String>,
    yes: bool,
) -> anyhow::Result<()> {
    let interactive = name.is_none() && !yes;

    loop {
        let user_name = match &name {
            Some(name) => name.clone(),
            None if yes => session.state().view.filename_input.clone(),
            None => match review::prompt_file_name(&session.state().view.filename_input)? {
                ReviewAction::Save(name) => name,
                ReviewAction::Cancel => {
                    session.delete_selection();
                    println!("Cancelled");
                    return Ok(());
                }
            },
        };

        match save_with_progress(session, renderer, &user_name).await {
            CommitOutcome::Saved { .. } => {
                print_view(&session.state().view);
                return Ok(());
            }
            CommitOutcome::Rejected(e) => {
                if !interactive {
                    bail!(e);
                }
            }
            CommitOutcome::Failed(e) => {
                if !interactive || !review::confirm_retry()? {
                    bail!(e);
                }
            }
        }
    }
}

fn print_drive(drive: DriveAffordance, backend_url: &str) {
    match drive {
        DriveAffordance::ShowDisconnect => println!("Google Drive: connected"),
        DriveAffordance::ShowConnect => {
            println!("Google Drive: not connected (connect at {}/connect-drive)", backend_url)
        }
        DriveAffordance::Unknown => println!("Google Drive: unknown"),
    }
}
