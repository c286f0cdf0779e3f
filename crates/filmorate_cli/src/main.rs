//! CLI smoke adapter over the catalog core.
//!
//! # Responsibility
//! - Load configuration and start logging for the process.
//! - Drive a short catalog walkthrough and report each outcome the way a
//!   transport adapter would (status code plus JSON body).

use chrono::NaiveDate;
use filmorate_core::{Catalog, CoreConfig, ErrorKind, Film, RepoResult, User};
use log::{debug, info, warn};
use serde_json::{json, Value};

/// Transport status for a catalog error kind.
fn status_for(kind: ErrorKind) -> u16 {
    match kind {
        ErrorKind::Validation | ErrorKind::ConditionsNotMet => 400,
        ErrorKind::NotFound => 404,
        ErrorKind::Internal => 500,
    }
}

/// Prints one operation outcome as `<op> <status> <body>`.
fn report<T: serde::Serialize>(operation: &str, outcome: RepoResult<T>) {
    match outcome {
        Ok(body) => {
            let body = serde_json::to_value(&body).unwrap_or(Value::Null);
            debug!("event=op_ok module=cli op={operation}");
            println!("{operation} 200 {body}");
        }
        Err(err) => {
            let status = status_for(err.kind());
            warn!(
                "event=op_failed module=cli op={operation} status={status} error={}",
                filmorate_core::logging::sanitize_message(&err.to_string(), 160)
            );
            println!(
                "{operation} {status} {}",
                json!({ "status": status, "errorMessages": err.messages() })
            );
        }
    }
}

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

fn run(catalog: &Catalog) {
    let Some(release) = date(2000, 1, 1) else {
        return;
    };

    report(
        "film.add",
        catalog.films.add(Film::new("Sample", "d", release, 90)),
    );
    report(
        "user.add",
        catalog
            .users
            .add(User::new("first@mail.ru", "first", "", date(1990, 5, 17))),
    );
    report(
        "user.add",
        catalog
            .users
            .add(User::new("second@mail.ru", "second", "Second", None)),
    );

    report("film.like", catalog.films.like(1, 1));
    report("film.like", catalog.films.like(1, 2));
    report("film.like", catalog.films.like(1, 2));
    report("film.popular", catalog.films.popular(Some(1)));

    report("user.add_friend", catalog.users.add_friend(1, 2));
    report("user.add_friend", catalog.users.add_friend(1, 1));
    report("user.friends", catalog.users.friends_of(1));
    report("user.mutual_friends", catalog.users.mutual_friends(1, 2));
    report("user.remove_friend", catalog.users.remove_friend(1, 2));

    report("film.unlike", catalog.films.unlike(1, 1));
    report("film.unlike", catalog.films.unlike(1, 2));
    report("film.popular", catalog.films.popular(None));
    report(
        "film.update",
        catalog.films.update(Film::new("Ghost", "d", release, 90).with_id(999)),
    );
    report("film.list", catalog.films.find_all());
    report("user.list", catalog.users.find_all());
}

fn main() {
    let loaded = CoreConfig::from_env();
    if let Err(err) = filmorate_core::init_from_config(&loaded.config) {
        eprintln!("filmorate: logging disabled: {err}");
    }
    for warning in &loaded.warnings {
        warn!("event=config_warning module=cli message={warning}");
    }

    info!(
        "event=cli_start module=cli status=ok version={} popular_default={}",
        filmorate_core::core_version(),
        loaded.config.popular_default_limit
    );

    let catalog = Catalog::from_config(&loaded.config);
    run(&catalog);

    info!("event=cli_exit module=cli status=ok");
}
