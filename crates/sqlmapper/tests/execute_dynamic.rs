use pretty_assertions::assert_eq;
use sqlmapper::{stmt::ValueRecord, EmptyCollection, Mappers, Value};

const USERS: &str = r#"<mapper namespace="users">
  <sql id="columns">id, name, email</sql>

  <select id="search">
    SELECT <include refid="columns"/> FROM users
    <where>
      <if test="name != null">AND name = #{name}</if>
      <if test="email != null and email != ''">AND email = #{email}</if>
    </where>
  </select>

  <update id="patch">
    UPDATE users
    <set>
      <if test="name != null">name = #{name},</if>
      <if test="email != null">email = #{email},</if>
    </set>
    WHERE id = #{id}
  </update>

  <select id="byIds">
    SELECT * FROM users WHERE id IN
    <foreach collection="ids" item="id" open="(" separator="," close=")">#{id}</foreach>
  </select>

  <insert id="createAll">
    INSERT INTO users (name, age) VALUES
    <foreach collection="users" item="user" index="i" separator=",">(#{user.name}, #{user.age})</foreach>
  </insert>

  <select id="ordered">
    SELECT * FROM users
    <choose>
      <when test="sort == 'name'">ORDER BY name</when>
      <when test="sort == 'age'">ORDER BY age</when>
      <when test="sort == 'email'">ORDER BY email</when>
      <otherwise>ORDER BY id</otherwise>
    </choose>
  </select>

  <select id="like">
    <bind name="pattern" value="'%' + name + '%'"/>
    SELECT * FROM users WHERE name LIKE #{pattern}
  </select>

  <select id="older">
    SELECT * FROM users
    <trim prefix="WHERE" prefixOverrides="AND |OR ">
      <if test="age > 18">AND age &gt; #{age}</if>
      <if test="active">OR active = #{active}</if>
    </trim>
  </select>
</mapper>"#;

fn mappers() -> Mappers {
    Mappers::builder()
        .shrink_whitespace(true)
        .mapper_str(USERS)
        .build()
        .unwrap()
}

fn record(fields: &[(&str, Value)]) -> Value {
    fields
        .iter()
        .map(|(name, value)| (*name, value.clone()))
        .collect::<ValueRecord>()
        .into()
}

// --- where ---

#[test]
fn where_drops_leading_and() {
    let bound = mappers()
        .select("users.search", &record(&[("name", "Ada".into())]))
        .unwrap();

    assert_eq!(
        bound.sql,
        "SELECT id, name, email FROM users WHERE name = ?"
    );
    assert_eq!(bound.args, [Value::from("Ada")]);
}

#[test]
fn where_with_every_branch() {
    let bound = mappers()
        .select(
            "users.search",
            &record(&[("name", "Ada".into()), ("email", "ada@example.com".into())]),
        )
        .unwrap();

    assert_eq!(
        bound.sql,
        "SELECT id, name, email FROM users WHERE name = ? AND email = ?"
    );
    assert_eq!(
        bound.args,
        [Value::from("Ada"), Value::from("ada@example.com")]
    );
}

#[test]
fn where_with_no_branch_emits_nothing() {
    let bound = mappers()
        .select("users.search", &record(&[("email", "".into())]))
        .unwrap();

    assert_eq!(bound.sql, "SELECT id, name, email FROM users");
    assert!(bound.args.is_empty());
}

// --- set ---

#[test]
fn set_drops_trailing_comma() {
    let bound = mappers()
        .update(
            "users.patch",
            &record(&[
                ("id", 1i64.into()),
                ("name", "Ada".into()),
                ("email", "ada@example.com".into()),
            ]),
        )
        .unwrap();

    assert_eq!(
        bound.sql,
        "UPDATE users SET name = ?, email = ? WHERE id = ?"
    );
    assert_eq!(
        bound.args,
        [
            Value::from("Ada"),
            Value::from("ada@example.com"),
            Value::I64(1)
        ]
    );
}

#[test]
fn set_with_one_branch() {
    let bound = mappers()
        .update(
            "users.patch",
            &record(&[("id", 1i64.into()), ("email", "a@b.c".into())]),
        )
        .unwrap();

    assert_eq!(bound.sql, "UPDATE users SET email = ? WHERE id = ?");
}

// --- foreach ---

#[test]
fn foreach_over_three_elements() {
    let bound = mappers()
        .select(
            "users.byIds",
            &record(&[("ids", vec![3i64, 1, 2].into())]),
        )
        .unwrap();

    assert_eq!(bound.sql, "SELECT * FROM users WHERE id IN (?,?,?)");
    assert_eq!(bound.args, [Value::I64(3), Value::I64(1), Value::I64(2)]);
}

#[test]
fn foreach_over_records() {
    let users = vec![
        ValueRecord::new().field("name", "Ada").field("age", 36i64),
        ValueRecord::new().field("name", "Grace").field("age", 85i64),
    ];

    let bound = mappers()
        .insert("users.createAll", &record(&[("users", users.into())]))
        .unwrap();

    assert_eq!(
        bound.sql,
        "INSERT INTO users (name, age) VALUES (?, ?),(?, ?)"
    );
    assert_eq!(
        bound.args,
        [
            Value::from("Ada"),
            Value::I64(36),
            Value::from("Grace"),
            Value::I64(85)
        ]
    );
}

#[test]
fn foreach_over_empty_collection_is_an_error() {
    let err = mappers()
        .select("users.byIds", &record(&[("ids", Value::List(vec![]))]))
        .unwrap_err();

    assert!(err.any(sqlmapper::Error::is_expression_evaluation_failed));
    assert!(err.to_string().contains("failed to execute `users.byIds`"));
}

#[test]
fn foreach_over_missing_collection_is_an_error() {
    let err = mappers()
        .select("users.byIds", &record(&[]))
        .unwrap_err();

    assert!(err.any(sqlmapper::Error::is_expression_evaluation_failed));
}

#[test]
fn foreach_over_empty_collection_can_render() {
    let mappers = Mappers::builder()
        .shrink_whitespace(true)
        .empty_collection(EmptyCollection::Render)
        .mapper_str(USERS)
        .build()
        .unwrap();

    let bound = mappers
        .select("users.byIds", &record(&[("ids", Value::List(vec![]))]))
        .unwrap();

    assert_eq!(bound.sql, "SELECT * FROM users WHERE id IN ()");
    assert!(bound.args.is_empty());
}

// --- choose ---

#[test]
fn choose_takes_only_the_matching_when() {
    let bound = mappers()
        .select("users.ordered", &record(&[("sort", "age".into())]))
        .unwrap();

    assert_eq!(bound.sql, "SELECT * FROM users ORDER BY age");
}

#[test]
fn choose_falls_back_to_otherwise() {
    let bound = mappers()
        .select("users.ordered", &record(&[("sort", "unknown".into())]))
        .unwrap();

    assert_eq!(bound.sql, "SELECT * FROM users ORDER BY id");

    let bound = mappers().select("users.ordered", &record(&[])).unwrap();

    assert_eq!(bound.sql, "SELECT * FROM users ORDER BY id");
}

// --- bind ---

#[test]
fn bind_introduces_a_name() {
    let bound = mappers()
        .select("users.like", &record(&[("name", "ad".into())]))
        .unwrap();

    assert_eq!(bound.sql, "SELECT * FROM users WHERE name LIKE ?");
    assert_eq!(bound.args, [Value::from("%ad%")]);
}

// --- trim ---

#[test]
fn trim_with_prefix_overrides() {
    let bound = mappers()
        .select(
            "users.older",
            &record(&[("age", 10i64.into()), ("active", true.into())]),
        )
        .unwrap();

    assert_eq!(bound.sql, "SELECT * FROM users WHERE active = ?");
    assert_eq!(bound.args, [Value::Bool(true)]);

    let bound = mappers()
        .select(
            "users.older",
            &record(&[("age", 30i64.into()), ("active", false.into())]),
        )
        .unwrap();

    assert_eq!(bound.sql, "SELECT * FROM users WHERE age > ?");
    assert_eq!(bound.args, [Value::I64(30)]);
}
