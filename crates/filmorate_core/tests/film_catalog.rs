use chrono::NaiveDate;
use filmorate_core::{Catalog, EntityRef, ErrorKind, Film, RepoError, User};
use std::sync::{Arc, Barrier};
use std::thread;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn sample_film() -> Film {
    Film::new("Sample", "d", date(2000, 1, 1), 90)
}

fn add_user(catalog: &Catalog, login: &str) -> i64 {
    catalog
        .users
        .add(User::new(format!("{login}@mail.ru"), login, "", None))
        .unwrap()
        .id
        .unwrap()
}

#[test]
fn like_and_unlike_walkthrough() {
    let catalog = Catalog::in_memory();
    let film = catalog.films.add(sample_film()).unwrap();
    assert_eq!(film.id, Some(1));
    let first = add_user(&catalog, "first");
    let second = add_user(&catalog, "second");

    catalog.films.like(1, first).unwrap();
    catalog.films.like(1, second).unwrap();
    assert_eq!(catalog.films.popular(Some(1)).unwrap(), vec![film]);
    assert_eq!(catalog.films.like_count(1).unwrap(), 2);

    catalog.films.unlike(1, first).unwrap();
    catalog.films.unlike(1, second).unwrap();
    assert!(catalog.films.popular(Some(10)).unwrap().is_empty());
}

#[test]
fn release_date_boundary_applies_to_add_and_update() {
    let catalog = Catalog::in_memory();
    let mut film = sample_film();
    film.release_date = date(1895, 12, 28);
    let stored = catalog.films.add(film).unwrap();

    let mut too_early = stored.clone();
    too_early.release_date = date(1895, 12, 27);
    let err = catalog.films.update(too_early).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let mut too_early_new = sample_film();
    too_early_new.release_date = date(1895, 12, 27);
    assert_eq!(
        catalog.films.add(too_early_new).unwrap_err().kind(),
        ErrorKind::Validation
    );
    assert_eq!(catalog.films.find_all().unwrap().len(), 1);
}

#[test]
fn update_without_id_or_with_unknown_id_fails() {
    let catalog = Catalog::in_memory();
    catalog.films.add(sample_film()).unwrap();

    let err = catalog.films.update(sample_film()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConditionsNotMet);

    let err = catalog.films.update(sample_film().with_id(999)).unwrap_err();
    assert_eq!(err, RepoError::NotFound(EntityRef::Film(999)));
}

#[test]
fn update_replaces_fields_and_keeps_id() {
    let catalog = Catalog::in_memory();
    let stored = catalog.films.add(sample_film()).unwrap();

    let changed = Film::new("Renamed", "new text", date(1999, 9, 9), 45).with_id(1);
    let updated = catalog.films.update(changed.clone()).unwrap();
    assert_eq!(updated, changed);
    assert_eq!(catalog.films.get_film(1).unwrap(), changed);
    assert_ne!(stored, updated);
}

#[test]
fn like_requires_existing_film_and_user() {
    let catalog = Catalog::in_memory();
    let user = add_user(&catalog, "liker");

    let err = catalog.films.like(5, user).unwrap_err();
    assert_eq!(err, RepoError::NotFound(EntityRef::Film(5)));

    catalog.films.add(sample_film()).unwrap();
    let err = catalog.films.like(1, 42).unwrap_err();
    assert_eq!(err, RepoError::NotFound(EntityRef::User(42)));

    let err = catalog.films.unlike(1, 42).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(catalog.films.popular(None).unwrap().is_empty());
}

#[test]
fn duplicate_like_is_rejected() {
    let catalog = Catalog::in_memory();
    catalog.films.add(sample_film()).unwrap();
    let user = add_user(&catalog, "fan");

    catalog.films.like(1, user).unwrap();
    let err = catalog.films.like(1, user).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConditionsNotMet);
    assert_eq!(catalog.films.like_count(1).unwrap(), 1);
}

#[test]
fn unlike_twice_is_a_no_op() {
    let catalog = Catalog::in_memory();
    catalog.films.add(sample_film()).unwrap();
    let user = add_user(&catalog, "fan");

    catalog.films.like(1, user).unwrap();
    catalog.films.unlike(1, user).unwrap();
    catalog.films.unlike(1, user).unwrap();
    assert_eq!(catalog.films.like_count(1).unwrap(), 0);
}

#[test]
fn popular_orders_by_likes_then_id() {
    let catalog = Catalog::in_memory();
    for index in 0..4 {
        catalog
            .films
            .add(Film::new(format!("film {index}"), "d", date(2001, 1, 1), 60))
            .unwrap();
    }
    let users: Vec<i64> = (0..3).map(|i| add_user(&catalog, &format!("u{i}"))).collect();

    for user in &users {
        catalog.films.like(3, *user).unwrap();
    }
    catalog.films.like(4, users[0]).unwrap();
    catalog.films.like(2, users[1]).unwrap();

    let ids: Vec<Option<i64>> = catalog
        .films
        .popular(None)
        .unwrap()
        .into_iter()
        .map(|film| film.id)
        .collect();
    assert_eq!(ids, vec![Some(3), Some(2), Some(4)]);

    assert_eq!(catalog.films.popular(Some(2)).unwrap().len(), 2);
}

#[test]
fn popular_default_limit_is_ten() {
    let catalog = Catalog::in_memory();
    let user = add_user(&catalog, "fan");
    for index in 0..12 {
        let film = catalog
            .films
            .add(Film::new(format!("film {index}"), "d", date(2001, 1, 1), 60))
            .unwrap();
        catalog.films.like(film.id.unwrap(), user).unwrap();
    }

    assert_eq!(catalog.films.popular(None).unwrap().len(), 10);
    assert_eq!(catalog.films.popular(Some(0)).unwrap().len(), 10);
    assert_eq!(catalog.films.popular(Some(-1)).unwrap().len(), 10);
    assert_eq!(catalog.films.popular(Some(50)).unwrap().len(), 12);
}

#[test]
fn configured_popular_default_is_applied() {
    let config = filmorate_core::CoreConfig {
        popular_default_limit: 2,
        ..filmorate_core::CoreConfig::default()
    };
    let catalog = Catalog::from_config(&config);
    let user = add_user(&catalog, "fan");
    for index in 0..3 {
        let film = catalog
            .films
            .add(Film::new(format!("film {index}"), "d", date(2001, 1, 1), 60))
            .unwrap();
        catalog.films.like(film.id.unwrap(), user).unwrap();
    }

    assert_eq!(catalog.films.popular(None).unwrap().len(), 2);
}

#[test]
fn popular_with_huge_count_returns_only_liked_films() {
    let catalog = Catalog::in_memory();
    let film = catalog.films.add(sample_film()).unwrap();
    catalog.films.add(sample_film()).unwrap();
    let user = add_user(&catalog, "fan");
    catalog.films.like(1, user).unwrap();

    assert_eq!(catalog.films.popular(Some(i32::MAX)).unwrap(), vec![film]);
}

#[test]
fn huge_configured_default_does_not_preallocate() {
    let config = filmorate_core::CoreConfig {
        popular_default_limit: usize::MAX,
        ..filmorate_core::CoreConfig::default()
    };
    let catalog = Catalog::from_config(&config);
    catalog.films.add(sample_film()).unwrap();
    let user = add_user(&catalog, "fan");
    catalog.films.like(1, user).unwrap();

    assert_eq!(catalog.films.popular(None).unwrap().len(), 1);
}

#[test]
fn concurrent_likes_of_the_same_pair_record_one_like() {
    const THREADS: usize = 8;

    let catalog = Arc::new(Catalog::in_memory());
    catalog.films.add(sample_film()).unwrap();
    let user = add_user(&catalog, "fan");
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let catalog = Arc::clone(&catalog);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                catalog.films.like(1, user)
            })
        })
        .collect();
    let outcomes: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(outcomes.iter().filter(|outcome| outcome.is_ok()).count(), 1);
    for err in outcomes.iter().filter_map(|outcome| outcome.as_ref().err()) {
        assert_eq!(err.kind(), ErrorKind::ConditionsNotMet);
    }
    assert_eq!(catalog.films.like_count(1).unwrap(), 1);
}

#[test]
fn concurrent_like_unlike_cycles_leave_no_residue() {
    let catalog = Arc::new(Catalog::in_memory());
    catalog.films.add(sample_film()).unwrap();
    let users: Vec<i64> = (0..4).map(|i| add_user(&catalog, &format!("u{i}"))).collect();

    let handles: Vec<_> = users
        .iter()
        .map(|user| {
            let catalog = Arc::clone(&catalog);
            let user = *user;
            thread::spawn(move || {
                for _ in 0..100 {
                    catalog.films.like(1, user).unwrap();
                    catalog.films.unlike(1, user).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(catalog.films.like_count(1).unwrap(), 0);
    assert!(catalog.films.popular(None).unwrap().is_empty());
}
