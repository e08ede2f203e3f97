use pretty_assertions::assert_eq;
use sqlmapper::{stmt::ValueRecord, Mappers, StatementKind, Value};

const USERS: &str = r#"<mapper namespace="users">
  <select id="find" resultType="User">SELECT * FROM users WHERE id = #{id}</select>
  <select id="byName">SELECT * FROM users WHERE last = #{last} AND first = #{first} OR nick = #{last}</select>
  <select id="byCity">SELECT * FROM users WHERE city = #{address.city} AND zip = #{address.zip,jdbcType=VARCHAR}</select>
  <select id="all">SELECT * FROM users</select>
  <insert id="create">INSERT INTO users (name, age) VALUES (#{name}, #{age})</insert>
</mapper>"#;

fn mappers() -> Mappers {
    Mappers::builder().mapper_str(USERS).build().unwrap()
}

#[test]
fn single_placeholder() {
    let bound = mappers()
        .select("users.find", &ValueRecord::new().field("id", 7i64).into())
        .unwrap();

    assert_eq!(bound.sql, "SELECT * FROM users WHERE id = ?");
    assert_eq!(bound.args, [Value::I64(7)]);
    assert_eq!(bound.kind, StatementKind::Select);
    assert_eq!(bound.statement_id, "users.find");
    assert_eq!(bound.result_type.as_deref(), Some("User"));
}

#[test]
fn args_follow_marker_order() {
    let param = ValueRecord::new()
        .field("first", "Ada")
        .field("last", "Lovelace")
        .into();

    let bound = mappers().select("users.byName", &param).unwrap();

    assert_eq!(
        bound.sql,
        "SELECT * FROM users WHERE last = ? AND first = ? OR nick = ?"
    );
    assert_eq!(
        bound.args,
        [
            Value::from("Lovelace"),
            Value::from("Ada"),
            Value::from("Lovelace")
        ]
    );
}

#[test]
fn nested_paths_and_placeholder_options() {
    let param = ValueRecord::new()
        .field(
            "address",
            ValueRecord::new().field("city", "Paris").field("zip", "75001"),
        )
        .into();

    let bound = mappers().select("users.byCity", &param).unwrap();

    assert_eq!(bound.sql, "SELECT * FROM users WHERE city = ? AND zip = ?");
    assert_eq!(bound.args, [Value::from("Paris"), Value::from("75001")]);
}

#[test]
fn missing_property_binds_null() {
    let bound = mappers()
        .insert("users.create", &ValueRecord::new().field("name", "Ada").into())
        .unwrap();

    assert_eq!(bound.sql, "INSERT INTO users (name, age) VALUES (?, ?)");
    assert_eq!(bound.args, [Value::from("Ada"), Value::Null]);
}

#[test]
fn no_placeholders() {
    let bound = mappers().select("users.all", &Value::Null).unwrap();

    assert_eq!(bound.sql, "SELECT * FROM users");
    assert!(bound.args.is_empty());
}

#[test]
fn scalar_parameter_answers_any_name() {
    let bound = mappers().select("users.find", &Value::I64(3)).unwrap();

    assert_eq!(bound.args, [Value::I64(3)]);
}

#[test]
fn serde_parameter() {
    #[derive(serde::Serialize)]
    struct NewUser {
        name: String,
        age: i64,
    }

    let param = Value::from_serialize(&NewUser {
        name: "Grace".to_string(),
        age: 85,
    })
    .unwrap();

    let bound = mappers().insert("users.create", &param).unwrap();

    assert_eq!(bound.args, [Value::from("Grace"), Value::I64(85)]);
}

#[test]
fn literal_bodies_match_a_plain_rewrite() {
    // With no tags, the SQL is the body with each `#{..}` swapped for `?`
    // and the arguments are the resolved paths in the same order.
    let mappers = mappers();
    let param: Value = ValueRecord::new()
        .field("id", 1i64)
        .field("first", "a")
        .field("last", "b")
        .field("name", "c")
        .field("age", 2i64)
        .into();

    for id in ["find", "byName", "all", "create"] {
        let stmt = mappers.statement(&format!("users.{id}")).unwrap();
        let bound = mappers.execute(&stmt.qualified_id(), &param).unwrap();

        let mut expected_sql = String::new();
        let mut expected_args = vec![];
        let mut rest = stmt.body.as_str();
        while let Some(start) = rest.find("#{") {
            let end = start + rest[start..].find('}').unwrap();
            expected_sql.push_str(&rest[..start]);
            expected_sql.push('?');
            expected_args.push(param.get(&rest[start + 2..end]).cloned().unwrap());
            rest = &rest[end + 1..];
        }
        expected_sql.push_str(rest);

        assert_eq!(bound.sql, expected_sql.trim());
        assert_eq!(bound.args, expected_args);
    }
}
