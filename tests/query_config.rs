#[cfg(test)]
mod tests {
    use bqext::{
        BqError, QueryConfig, QueryContext, TableRef, WriteDisposition, dedup_query, error_kind,
        is_legacy_sql, legacy_string_literal, truncate_at_boundary,
    };
    use indoc::indoc;

    fn context() -> QueryContext {
        QueryContext::new("acme-analytics", "telemetry")
    }

    #[test]
    fn legacy_detection() {
        assert!(is_legacy_sql("#legacySQL\nSELECT 1"));
        assert!(!is_legacy_sql("SELECT 1"));
        assert!(!is_legacy_sql("#standardSQL\nSELECT 1"));
        assert!(!is_legacy_sql(" #legacySQL\nSELECT 1"));
        assert!(!is_legacy_sql("#LEGACYSQL\nSELECT 1"));
        assert!(!is_legacy_sql("SELECT 1 -- #legacySQL"));
    }

    #[test]
    fn result_query() {
        let query = QueryConfig::result("#legacySQL\nSELECT 1", false, &context());
        assert!(query.use_legacy_sql);
        assert!(!query.dry_run);
        assert_eq!(query.default_project_id, "acme-analytics");
        assert_eq!(query.default_dataset_id, "telemetry");
        assert_eq!(query.destination, None);
        assert_eq!(query.write_disposition, None);
        assert!(query.flatten_results);

        let query = QueryConfig::result("SELECT 1", true, &context());
        assert!(!query.use_legacy_sql);
        assert!(query.dry_run);
        assert_eq!(query.text, "SELECT 1");
    }

    #[test]
    fn destination_query() {
        let destination = TableRef::new("acme-analytics", "telemetry", "clean$20230101");
        let query = QueryConfig::destination("SELECT 1", Some(destination.clone()), &context());
        assert!(!query.dry_run);
        assert!(query.allow_large_results);
        assert!(!query.flatten_results);
        assert_eq!(query.destination, Some(destination));
        assert_eq!(query.write_disposition, None);
        let query = query.with_write_disposition(WriteDisposition::Append);
        assert_eq!(query.write_disposition, Some(WriteDisposition::Append));

        // No destination, nothing can be written
        let query = QueryConfig::destination("#legacySQL\nSELECT 1", None, &context());
        assert!(query.dry_run);
        assert!(query.use_legacy_sql);
        assert!(query.allow_large_results);
        assert!(!query.flatten_results);
    }

    #[test]
    fn resolve_table() {
        let query = QueryConfig::result("SELECT 1", false, &context());
        assert_eq!(
            query.resolve_table("events"),
            TableRef::new("acme-analytics", "telemetry", "events")
        );
        assert_eq!(
            query.resolve_table("archive.events"),
            TableRef::new("acme-analytics", "archive", "events")
        );
        assert_eq!(
            query.resolve_table("`other-project.archive.events$20230101`"),
            TableRef::new("other-project", "archive", "events$20230101")
        );
        assert_eq!(
            query.resolve_table("other-project:archive.events"),
            TableRef::new("other-project", "archive", "events")
        );
    }

    #[test]
    fn table_ref() {
        let table = TableRef::new("acme-analytics", "telemetry", "events$20230101");
        assert!(table.has_partition());
        assert_eq!(table.base_table(), "events");
        assert_eq!(table.partition(), Some("20230101"));
        assert_eq!(table.full_name(), "acme-analytics.telemetry.events$20230101");
        assert_eq!(table.legacy_name(), "acme-analytics:telemetry.events$20230101");
        assert_eq!(table.to_string(), table.full_name());
        assert_eq!(
            table.without_partition(),
            TableRef::new("acme-analytics", "telemetry", "events")
        );

        let table = context().table("events");
        assert!(!table.has_partition());
        assert_eq!(table.partition(), None);
        assert_eq!(table.base_table(), "events");
        assert_eq!(TableRef::new("", "", "events").full_name(), "events");
    }

    #[test]
    fn context_from_url() {
        let parsed = QueryContext::from_url("fake://acme-analytics/telemetry").unwrap();
        assert_eq!(parsed, context());
        assert_eq!(parsed.to_string(), "acme-analytics.telemetry");
        assert_eq!(
            QueryContext::from_url("fake://acme-analytics/telemetry/").unwrap(),
            parsed
        );
        for url in [
            "acme-analytics/telemetry",
            "fake://acme-analytics",
            "fake:///telemetry",
            "fake://acme-analytics/telemetry/events",
        ] {
            let error = QueryContext::from_url(url).unwrap_err();
            assert!(
                matches!(error_kind(&error), Some(BqError::Build { .. })),
                "Unexpected error for `{url}`: {error:#}"
            );
        }
    }

    #[test]
    fn dedup_text() {
        assert_eq!(
            dedup_query("telemetry.readings", "sensor"),
            indoc! {"
                #standardSQL
                # Delete all duplicate rows based on sensor
                SELECT * EXCEPT (row_number)
                FROM (
                  SELECT *, ROW_NUMBER() OVER (PARTITION BY sensor) row_number
                  FROM `telemetry.readings`)
                WHERE row_number = 1"}
        );
        let query = QueryConfig::destination(
            dedup_query("readings", "sensor, day"),
            None,
            &context(),
        );
        assert!(!query.use_legacy_sql);
    }

    #[test]
    fn legacy_literals() {
        assert_eq!(legacy_string_literal("20230101"), r#""20230101""#);
        assert_eq!(legacy_string_literal(r#"a"b\c"#), r#""a\"b\\c""#);
    }

    #[test]
    fn truncate() {
        assert_eq!(truncate_at_boundary("short", 497), "short");
        assert_eq!(truncate_at_boundary("ééé", 3), "é");
        let long = "x".repeat(600);
        let query = QueryConfig::result(long.clone(), false, &context());
        let shown = query.to_string();
        assert!(shown.ends_with("..."));
        assert_eq!(shown.len(), 500);
    }
}
