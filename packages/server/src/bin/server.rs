use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use dais_server::infrastructure::{
    analytics::LogAnalyticsSink, notification_hub::NotificationHub, pusher::WebSocketEventPusher,
    registry::ConnectionRegistry, repository::InMemorySessionRepository,
    snapshot::EmptyViewerSnapshotSource,
};
use dais_server::ui::{AppState, Server};
use dais_server::usecase::{
    DisconnectParticipantUseCase, GetViewersUseCase, HeartbeatUseCase, JoinPresentationUseCase,
    PresenceSweepUseCase, PresenterNavigateUseCase, PushNotificationUseCase,
    RelayAnnotationUseCase, SessionQueriesUseCase, ToggleFollowUseCase, UpdateSlideUseCase,
};
use dais_shared::logger::setup_logger;
use dais_shared::time::SystemClock;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Host to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Seconds without any event before an online participant is marked away
    #[arg(long, default_value_t = 60)]
    away_timeout_secs: u64,

    /// Seconds between away sweep passes
    #[arg(long, default_value_t = 15)]
    sweep_interval_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let args = Args::parse();
    setup_logger("dais-server", "debug");

    // 1. Infrastructure
    let clock = Arc::new(SystemClock);
    let repository = Arc::new(InMemorySessionRepository::new());
    let pusher = Arc::new(WebSocketEventPusher::new());
    let snapshot_source = Arc::new(EmptyViewerSnapshotSource::new());
    let analytics = Arc::new(LogAnalyticsSink::new());
    let registry = Arc::new(ConnectionRegistry::new());
    let notification_hub = Arc::new(NotificationHub::new());

    // 2. Use cases
    let join_presentation_usecase = Arc::new(JoinPresentationUseCase::new(
        repository.clone(),
        pusher.clone(),
        snapshot_source,
        clock.clone(),
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        repository.clone(),
        pusher.clone(),
        analytics.clone(),
        clock.clone(),
    ));
    let update_slide_usecase = Arc::new(UpdateSlideUseCase::new(
        repository.clone(),
        pusher.clone(),
        analytics.clone(),
        clock.clone(),
    ));
    let presenter_navigate_usecase = Arc::new(PresenterNavigateUseCase::new(
        repository.clone(),
        pusher.clone(),
        analytics,
        clock.clone(),
    ));
    let toggle_follow_usecase = Arc::new(ToggleFollowUseCase::new(
        repository.clone(),
        clock.clone(),
    ));
    let get_viewers_usecase = Arc::new(GetViewersUseCase::new(repository.clone()));
    let relay_annotation_usecase =
        Arc::new(RelayAnnotationUseCase::new(repository.clone(), pusher));
    let heartbeat_usecase = Arc::new(HeartbeatUseCase::new(repository.clone(), clock.clone()));
    let push_notification_usecase = Arc::new(PushNotificationUseCase::new(
        notification_hub.clone(),
        clock.clone(),
    ));
    let session_queries_usecase = Arc::new(SessionQueriesUseCase::new(repository.clone()));

    // 3. Background away sweep
    let sweep = PresenceSweepUseCase::new(
        repository,
        clock,
        Duration::from_secs(args.away_timeout_secs),
    );
    let sweep_interval = Duration::from_secs(args.sweep_interval_secs);
    tokio::spawn(async move {
        sweep.run(sweep_interval).await;
    });

    // 4. Server state and startup
    let state = Arc::new(AppState {
        registry,
        notification_hub,
        join_presentation_usecase,
        disconnect_participant_usecase,
        update_slide_usecase,
        presenter_navigate_usecase,
        toggle_follow_usecase,
        get_viewers_usecase,
        relay_annotation_usecase,
        heartbeat_usecase,
        push_notification_usecase,
        session_queries_usecase,
    });
    Server::new(args.host, args.port).run(state).await
}
