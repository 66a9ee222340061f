#[cfg(test)]
mod tests {
    use std::{collections::HashSet, time::Duration};

    use axum::http::StatusCode;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    use crate::{
        config::ServerConfig,
        db::utils::fetch_exchange_rates,
        error::REQUEST_TIMEOUT_MESSAGE,
        services::QuoteService,
        test::{
            PAIR_PATH, config_with_timings, database_path, sample_payload, setup_db, test_config,
        },
    };

    async fn upstream_returning(template: ResponseTemplate, expected_calls: u64) -> MockServer {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PAIR_PATH))
            .respond_with(template)
            .expect(expected_calls)
            .mount(&upstream)
            .await;
        upstream
    }

    #[tokio::test]
    async fn get_quote_fetches_and_stores() {
        let dir = tempfile::tempdir().unwrap();
        let connection = setup_db(dir.path()).await;
        let upstream = upstream_returning(
            ResponseTemplate::new(200).set_body_json(sample_payload("5.4321")),
            1,
        )
        .await;

        let service = QuoteService::new(
            test_config(&upstream.uri(), &database_path(dir.path())),
            connection.clone(),
        );
        let quote = service
            .get_quote(std::future::pending::<()>())
            .await
            .unwrap();

        assert_eq!(quote.bid(), "5.4321");

        let rows = fetch_exchange_rates(&connection).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].bid(), "5.4321");
        assert_eq!(rows[0].id().len(), 36);
    }

    #[tokio::test]
    async fn cancelled_request_never_reaches_upstream() {
        let dir = tempfile::tempdir().unwrap();
        let connection = setup_db(dir.path()).await;
        let upstream = upstream_returning(
            ResponseTemplate::new(200).set_body_json(sample_payload("5.4321")),
            0,
        )
        .await;

        let config = config_with_timings(
            &upstream.uri(),
            &database_path(dir.path()),
            Duration::from_secs(5),
            Duration::from_secs(2),
        );
        let service = QuoteService::new(config, connection.clone());

        let err = service
            .get_quote(tokio::time::sleep(Duration::from_millis(50)))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(err.message, REQUEST_TIMEOUT_MESSAGE);
        assert!(fetch_exchange_rates(&connection).await.unwrap().is_empty());
        upstream.verify().await;
    }

    #[tokio::test]
    async fn already_cancelled_request_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let connection = setup_db(dir.path()).await;
        let upstream = upstream_returning(ResponseTemplate::new(200), 0).await;

        let service = QuoteService::new(
            test_config(&upstream.uri(), &database_path(dir.path())),
            connection.clone(),
        );
        let err = service.get_quote(async {}).await.unwrap_err();

        assert_eq!(err.status, StatusCode::REQUEST_TIMEOUT);
        assert!(fetch_exchange_rates(&connection).await.unwrap().is_empty());
        upstream.verify().await;
    }

    #[tokio::test]
    async fn upstream_error_status_is_internal_error() {
        let dir = tempfile::tempdir().unwrap();
        let connection = setup_db(dir.path()).await;
        let upstream = upstream_returning(ResponseTemplate::new(502), 1).await;

        let service = QuoteService::new(
            test_config(&upstream.uri(), &database_path(dir.path())),
            connection.clone(),
        );
        let err = service
            .get_quote(std::future::pending::<()>())
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message.contains("Failed to fetch data from API"));
        assert!(fetch_exchange_rates(&connection).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_upstream_body_is_internal_error() {
        let dir = tempfile::tempdir().unwrap();
        let connection = setup_db(dir.path()).await;
        let upstream =
            upstream_returning(ResponseTemplate::new(200).set_body_string("not json"), 1).await;

        let service = QuoteService::new(
            test_config(&upstream.uri(), &database_path(dir.path())),
            connection.clone(),
        );
        let err = service
            .get_quote(std::future::pending::<()>())
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message.contains("Failed to parse JSON response"));
        assert!(fetch_exchange_rates(&connection).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let connection = setup_db(dir.path()).await;
        let upstream = upstream_returning(
            ResponseTemplate::new(200)
                .set_body_json(sample_payload("5.4321"))
                .set_delay(Duration::from_millis(500)),
            1,
        )
        .await;

        let config = config_with_timings(
            &upstream.uri(),
            &database_path(dir.path()),
            Duration::from_millis(10),
            Duration::from_millis(100),
        );
        let service = QuoteService::new(config, connection.clone());
        let err = service
            .get_quote(std::future::pending::<()>())
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::REQUEST_TIMEOUT);
        assert!(fetch_exchange_rates(&connection).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn every_request_adds_a_row() {
        let dir = tempfile::tempdir().unwrap();
        let connection = setup_db(dir.path()).await;
        let upstream = upstream_returning(
            ResponseTemplate::new(200).set_body_json(sample_payload("5.4321")),
            4,
        )
        .await;

        let service = QuoteService::new(
            test_config(&upstream.uri(), &database_path(dir.path())),
            connection.clone(),
        );

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.get_quote(std::future::pending::<()>()).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let rows = fetch_exchange_rates(&connection).await.unwrap();
        assert_eq!(rows.len(), 4);
        let ids: HashSet<&String> = rows.iter().map(|row| row.id()).collect();
        assert_eq!(ids.len(), 4);
    }

    #[tokio::test]
    async fn stored_rows_match_successes_under_default_insert_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let connection = setup_db(dir.path()).await;
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PAIR_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_payload("5.4321")))
            .mount(&upstream)
            .await;

        let config = ServerConfig::new(
            format!("{}/json/last", upstream.uri()),
            String::from("USD-BRL"),
            String::from("127.0.0.1:0"),
            database_path(dir.path()),
            Duration::from_millis(1),
            Duration::from_secs(2),
            *ServerConfig::default().insert_timeout(),
        );
        let service = QuoteService::new(config, connection.clone());

        let handles: Vec<_> = (0..60)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.get_quote(std::future::pending::<()>()).await })
            })
            .collect();

        let mut succeeded = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => succeeded += 1,
                Err(err) => {
                    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
                    assert!(err.message.starts_with("Failed to insert data into database"));
                }
            }
        }

        let rows = fetch_exchange_rates(&connection).await.unwrap();
        assert_eq!(rows.len(), succeeded);
    }

    #[tokio::test]
    async fn cancelling_during_insert_still_stores_and_returns_quote() {
        let dir = tempfile::tempdir().unwrap();
        let connection = setup_db(dir.path()).await;
        let upstream = upstream_returning(
            ResponseTemplate::new(200).set_body_json(sample_payload("5.4321")),
            1,
        )
        .await;

        // Hold the write lock so the insert blocks until COMMIT.
        let mut locker = connection.acquire().await.unwrap();
        sqlx::query("BEGIN IMMEDIATE")
            .execute(&mut *locker)
            .await
            .unwrap();

        let service = QuoteService::new(
            test_config(&upstream.uri(), &database_path(dir.path())),
            connection.clone(),
        );
        let request = tokio::spawn(async move {
            service
                .get_quote(tokio::time::sleep(Duration::from_millis(300)))
                .await
        });

        tokio::time::sleep(Duration::from_millis(600)).await;
        sqlx::query("COMMIT").execute(&mut *locker).await.unwrap();
        drop(locker);

        let quote = request.await.unwrap().unwrap();
        assert_eq!(quote.bid(), "5.4321");

        let rows = fetch_exchange_rates(&connection).await.unwrap();
        assert_eq!(rows.len(), 1);
    }
}
