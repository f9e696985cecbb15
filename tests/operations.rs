#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use skiff::{
        Entity, Error, Executor, FieldDef, NamedRow, Params, Row, Value, exec, insert,
        insert_skip, update,
    };
    use std::{collections::VecDeque, future::Future, mem};

    struct User {
        id: i64,
        name: String,
        email: String,
    }

    impl Entity for User {
        fn table() -> &'static str {
            "users"
        }
        fn fields() -> &'static [FieldDef] {
            const FIELDS: &[FieldDef] = &[
                FieldDef::new("ID", "id"),
                FieldDef::new("Name", "name"),
                FieldDef::new("Email", "email"),
            ];
            FIELDS
        }
        fn row(&self) -> NamedRow {
            Box::new([
                ("id", self.id.into()),
                ("name", self.name.as_str().into()),
                ("email", self.email.as_str().into()),
            ])
        }
    }

    struct Keyless {
        token: String,
    }

    impl Entity for Keyless {
        fn table() -> &'static str {
            "sessions"
        }
        fn fields() -> &'static [FieldDef] {
            const FIELDS: &[FieldDef] = &[FieldDef::new("Token", "token")];
            FIELDS
        }
        fn row(&self) -> NamedRow {
            Box::new([("token", self.token.as_str().into())])
        }
    }

    /// Records every statement it is handed and replays scripted results.
    #[derive(Default)]
    struct FakeExecutor {
        statements: Vec<(String, Vec<(String, Value)>)>,
        execute_results: VecDeque<anyhow::Result<u64>>,
        fetch_rows: Vec<anyhow::Result<Row>>,
    }

    impl FakeExecutor {
        fn record(&mut self, sql: &str, params: Params<'_>) {
            self.statements.push((
                sql.to_string(),
                params
                    .iter()
                    .map(|(name, value)| (name.to_string(), value.clone()))
                    .collect(),
            ));
        }
    }

    impl Executor for FakeExecutor {
        fn execute(
            &mut self,
            sql: &str,
            params: Params<'_>,
        ) -> impl Future<Output = anyhow::Result<u64>> + Send {
            self.record(sql, params);
            let result = self.execute_results.pop_front().unwrap_or(Ok(1));
            async move { result }
        }

        fn fetch(
            &mut self,
            sql: &str,
            params: Params<'_>,
        ) -> impl futures::Stream<Item = anyhow::Result<Row>> + Send {
            self.record(sql, params);
            futures::stream::iter(mem::take(&mut self.fetch_rows))
        }
    }

    fn user() -> User {
        User {
            id: 0,
            name: "Alice".into(),
            email: "alice@example.com".into(),
        }
    }

    #[tokio::test]
    async fn insert_returns_generated_key_and_count() {
        let mut executor = FakeExecutor {
            fetch_rows: vec![Ok(Box::new([Value::from(7i64)]))],
            ..Default::default()
        };
        let result = insert_skip(&mut executor, &user(), &["id"]).await.unwrap();
        assert_eq!(result.rows_affected, 1);
        assert_eq!(result.last_insert_id, Some(Value::from(7i64)));

        let (sql, params) = &executor.statements[0];
        assert_eq!(
            sql,
            r#"INSERT INTO users ("name", "email") VALUES (:name, :email) RETURNING id"#
        );
        assert_eq!(
            *params,
            vec![
                ("name".to_string(), Value::from("Alice")),
                ("email".to_string(), Value::from("alice@example.com")),
            ]
        );
    }

    #[tokio::test]
    async fn insert_without_skip_binds_every_column() {
        let mut executor = FakeExecutor {
            fetch_rows: vec![Ok(Box::new([Value::from(1i64)]))],
            ..Default::default()
        };
        insert(&mut executor, &user()).await.unwrap();
        let (sql, params) = &executor.statements[0];
        assert_eq!(
            sql,
            r#"INSERT INTO users ("id", "name", "email") VALUES (:id, :name, :email) RETURNING id"#
        );
        assert_eq!(params.len(), 3);
    }

    #[tokio::test]
    async fn insert_keeps_the_last_returned_key() {
        let mut executor = FakeExecutor {
            fetch_rows: vec![
                Ok(Box::new([Value::from(3i64)])),
                Ok(Box::new([Value::from(4i64)])),
            ],
            ..Default::default()
        };
        let result = insert(&mut executor, &user()).await.unwrap();
        assert_eq!(result.rows_affected, 2);
        assert_eq!(result.last_insert_id, Some(Value::from(4i64)));
    }

    #[tokio::test]
    async fn insert_with_zero_returned_rows_is_an_error() {
        let mut executor = FakeExecutor::default();
        let error = insert(&mut executor, &user()).await.unwrap_err();
        assert!(matches!(error, Error::NoRowsAffected));
    }

    #[tokio::test]
    async fn insert_surfaces_execution_failures() {
        let mut executor = FakeExecutor {
            fetch_rows: vec![Err(anyhow!("deadlock detected"))],
            ..Default::default()
        };
        let error = insert(&mut executor, &user()).await.unwrap_err();
        assert!(matches!(error, Error::Execution(..)));
    }

    #[tokio::test]
    async fn insert_requires_a_primary_key() {
        let mut executor = FakeExecutor::default();
        let entity = Keyless {
            token: "t0".into(),
        };
        let error = insert(&mut executor, &entity).await.unwrap_err();
        assert!(matches!(
            error,
            Error::MissingPrimaryKey { table: "sessions" }
        ));
        assert!(executor.statements.is_empty());
    }

    #[tokio::test]
    async fn update_targets_the_primary_key() {
        let mut executor = FakeExecutor::default();
        let entity = User { id: 7, ..user() };
        let result = update(&mut executor, &entity, &["Name"]).await.unwrap();
        assert_eq!(result.rows_affected, 1);
        assert_eq!(result.last_insert_id, None);

        let (sql, params) = &executor.statements[0];
        assert_eq!(sql, "UPDATE users set name = :name where id = :id");
        assert_eq!(
            *params,
            vec![
                ("id".to_string(), Value::from(7i64)),
                ("name".to_string(), Value::from("Alice")),
            ]
        );
    }

    #[tokio::test]
    async fn update_with_zero_affected_rows_is_an_error() {
        let mut executor = FakeExecutor {
            execute_results: VecDeque::from([Ok(0)]),
            ..Default::default()
        };
        let error = update(&mut executor, &user(), &["Name"]).await.unwrap_err();
        assert!(matches!(error, Error::NoRowsAffected));
    }

    #[tokio::test]
    async fn update_surfaces_execution_failures() {
        let mut executor = FakeExecutor {
            execute_results: VecDeque::from([Err(anyhow!("connection reset"))]),
            ..Default::default()
        };
        let error = update(&mut executor, &user(), &["Name"]).await.unwrap_err();
        assert!(matches!(error, Error::Execution(..)));
    }

    #[tokio::test]
    async fn entity_methods_delegate() {
        let mut executor = FakeExecutor {
            fetch_rows: vec![Ok(Box::new([Value::from(9i64)]))],
            ..Default::default()
        };
        let result = user().insert_skip(&mut executor, &["id"]).await.unwrap();
        assert_eq!(result.last_insert_id, Some(Value::from(9i64)));

        let result = user().update(&mut executor, &["Email"]).await.unwrap();
        assert_eq!(result.rows_affected, 1);
        assert_eq!(
            executor.statements[1].0,
            "UPDATE users set email = :email where id = :id"
        );
    }

    #[tokio::test]
    async fn exec_enforces_affected_rows() {
        let mut executor = FakeExecutor {
            execute_results: VecDeque::from([Ok(3), Ok(0)]),
            ..Default::default()
        };
        let affected = exec(&mut executor, "delete from users where id = :id", &[])
            .await
            .unwrap();
        assert_eq!(affected, 3);

        let error = exec(&mut executor, "delete from users where id = :id", &[])
            .await
            .unwrap_err();
        assert!(matches!(error, Error::NoRowsAffected));
    }
}
