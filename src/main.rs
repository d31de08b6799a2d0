use std::error::Error;
use std::sync::Arc;

use futures::future::FutureExt;
use log::{info, initialize_logger};
use tokio::sync::mpsc;
use warp::Filter;

use callcenter::config::Config;
use callcenter::dictionary::Dictionaries;
use callcenter::directory::Directory;
use callcenter::environment::Environment;
use callcenter::routes;
use callcenter::store::MemoryStore;
use callcenter::urls::Urls;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    let logger = initialize_logger();

    let config = Config::from_env()?;

    info!(logger, "Starting..."; "main_port" => config.port, "admin_port" => config.admin_port);
    let logger = Arc::new(logger);

    let urls = Arc::new(Urls::new(&config.base_url, config.calls_path.clone())?);

    let environment = Environment::new(
        logger.clone(),
        Arc::new(MemoryStore::new()),
        Arc::new(Dictionaries::default()),
        Arc::new(Directory::default()),
        urls,
    );

    let (termination_sender, mut termination_receiver) = mpsc::channel::<()>(1);

    let terminate: routes::admin::TerminationFunctionWrapper<'static> = Arc::new(move || {
        let termination_sender = termination_sender.clone();

        async move {
            // the receiver only goes away once shutdown has begun
            let _ = termination_sender.send(()).await;
        }
        .boxed()
    });

    let should_terminate = async move {
        termination_receiver.recv().await;
    }
    .shared();

    let ctrlc = {
        let should_terminate = should_terminate.clone();
        let terminate = terminate.clone();

        let signal = tokio::signal::ctrl_c();

        async move {
            tokio::select! {
                _ = should_terminate => {},
                _ = signal => {
                    terminate().await;
                }
            }
        }
    };

    let main_server = {
        let should_terminate = should_terminate.clone();

        let (_, main_server) = warp::serve(routes::make_api(environment.clone()))
            .bind_with_graceful_shutdown(([0, 0, 0, 0], config.port), async move {
                should_terminate.await;
            });

        main_server
    };

    let admin_server = {
        let should_terminate = should_terminate.clone();

        let routes = routes::admin::make_healthz_route(environment.clone()).or(
            routes::admin::make_termination_route(environment.clone(), terminate),
        );

        let (_, admin_server) = warp::serve(routes)
            .bind_with_graceful_shutdown(([0, 0, 0, 0], config.admin_port), async move {
                should_terminate.await;
            });

        admin_server
    };

    tokio::join!(ctrlc, main_server, admin_server);

    info!(logger, "Exiting gracefully...");

    Ok(())
}
