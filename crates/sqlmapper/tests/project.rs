use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use sqlmapper::{stmt::ValueRecord, Mappers, Row, Value};

const BLOG: &str = r#"<mapper namespace="blog">
  <resultMap id="author" type="Author">
    <id property="id" column="id"/>
    <result property="name" column="name"/>
  </resultMap>

  <resultMap id="post" type="Post">
    <id property="id" column="post_id"/>
    <result property="subject" column="post_subject"/>
    <result property="views" column="post_views" javaType="int"/>
  </resultMap>

  <resultMap id="blog" type="Blog">
    <id property="id" column="blog_id" javaType="long"/>
    <result property="title" column="blog_title"/>
    <result property="createdOn" column="created_on" javaType="date"/>
    <association property="author" resultMap="author" columnPrefix="author_"/>
    <collection property="posts" resultMap="post"/>
    <collection property="comments" select="comments.byBlog" column="blog_id"/>
  </resultMap>

  <resultMap id="featuredBlog" type="FeaturedBlog" extends="blog">
    <result property="title" column="featured_title"/>
    <result property="rank" column="rank" javaType="integer"/>
  </resultMap>

  <resultMap id="loose" type="Loose" autoMapping="true">
    <id property="id" column="id"/>
  </resultMap>

  <resultMap id="inline" type="Order">
    <id property="id" column="order_id"/>
    <collection property="lines" ofType="Line">
      <id property="sku" column="line_sku"/>
      <result property="qty" column="line_qty" javaType="int"/>
    </collection>
  </resultMap>
</mapper>"#;

fn mappers() -> Mappers {
    Mappers::builder().mapper_str(BLOG).build().unwrap()
}

fn row(columns: &[(&str, Value)]) -> Row {
    columns
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

fn record(ty: &str, fields: &[(&str, Value)]) -> Value {
    let mut record = ValueRecord::typed(ty);
    for (name, value) in fields {
        record.insert(name.to_string(), value.clone());
    }
    record.into()
}

// --- single row ---

#[test]
fn mapped_columns_with_coercion() {
    let row = row(&[
        ("blog_id", "7".into()),
        ("blog_title", "Notes".into()),
        ("created_on", "2024-03-01".into()),
        ("author_id", 1i64.into()),
        ("author_name", "Ada".into()),
        ("unmapped", "ignored".into()),
    ]);

    let value = mappers().project(&row, "blog.blog").unwrap();

    assert_eq!(
        value,
        record(
            "Blog",
            &[
                ("id", Value::I64(7)),
                ("title", "Notes".into()),
                (
                    "createdOn",
                    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().into()
                ),
                (
                    "author",
                    record("Author", &[("id", 1i64.into()), ("name", "Ada".into())])
                ),
                ("posts", Value::List(vec![])),
            ]
        )
    );
}

#[test]
fn missing_columns_are_skipped() {
    let row = row(&[("blog_id", 7i64.into())]);

    let value = mappers().project(&row, "blog.blog").unwrap();
    let record = value.expect_record();

    assert_eq!(record.get("id"), Some(&Value::I64(7)));
    assert_eq!(record.get("title"), None);
    assert_eq!(record.get("createdOn"), None);
    assert_eq!(record.get("author"), Some(&Value::Null));
}

#[test]
fn unparseable_coercion_keeps_the_raw_value() {
    let row = row(&[("blog_id", "seven".into()), ("created_on", "soon".into())]);

    let value = mappers().project(&row, "blog.blog").unwrap();
    let record = value.expect_record();

    assert_eq!(record.get("id"), Some(&Value::from("seven")));
    assert_eq!(record.get("createdOn"), Some(&Value::from("soon")));
}

#[test]
fn columns_match_ignoring_case() {
    let row = row(&[("BLOG_ID", 1i64.into()), ("Blog_Title", "Loud".into())]);

    let value = mappers().project(&row, "blog.blog").unwrap();
    let record = value.expect_record();

    assert_eq!(record.get("id"), Some(&Value::I64(1)));
    assert_eq!(record.get("title"), Some(&Value::from("Loud")));
}

#[test]
fn extends_inherits_and_overrides() {
    let row = row(&[
        ("blog_id", 1i64.into()),
        ("blog_title", "plain".into()),
        ("featured_title", "featured".into()),
        ("rank", "3".into()),
    ]);

    let value = mappers().project(&row, "blog.featuredBlog").unwrap();
    let record = value.expect_record();

    assert_eq!(record.ty.as_deref(), Some("FeaturedBlog"));
    assert_eq!(record.get("id"), Some(&Value::I64(1)));
    assert_eq!(record.get("title"), Some(&Value::from("featured")));
    assert_eq!(record.get("rank"), Some(&Value::I32(3)));
}

// --- auto-mapping ---

#[test]
fn auto_mapping_copies_unconsumed_columns() {
    let row = row(&[
        ("id", 1i64.into()),
        ("user_name", "ada".into()),
        ("created_at", "2024-01-01".into()),
    ]);

    let value = mappers().project(&row, "blog.loose").unwrap();

    assert_eq!(
        value,
        record(
            "Loose",
            &[
                ("id", 1i64.into()),
                ("user_name", "ada".into()),
                ("created_at", "2024-01-01".into()),
            ]
        )
    );
}

#[test]
fn auto_mapping_with_camel_case() {
    let mappers = Mappers::builder()
        .map_underscore_to_camel_case(true)
        .mapper_str(BLOG)
        .build()
        .unwrap();

    let row = row(&[("id", 1i64.into()), ("USER_NAME", "ada".into())]);

    let value = mappers.project(&row, "blog.loose").unwrap();

    assert_eq!(
        value,
        record("Loose", &[("id", 1i64.into()), ("userName", "ada".into())])
    );
}

// --- result sets ---

#[test]
fn rows_fold_by_id_into_collections() {
    let rows = [
        row(&[
            ("blog_id", 1i64.into()),
            ("blog_title", "First".into()),
            ("post_id", 10i64.into()),
            ("post_subject", "hello".into()),
            ("post_views", "5".into()),
        ]),
        row(&[
            ("blog_id", 1i64.into()),
            ("blog_title", "First".into()),
            ("post_id", 11i64.into()),
            ("post_subject", "again".into()),
            ("post_views", Value::Null),
        ]),
        row(&[
            ("blog_id", 2i64.into()),
            ("blog_title", "Second".into()),
            ("post_id", Value::Null),
            ("post_subject", Value::Null),
            ("post_views", Value::Null),
        ]),
    ];

    let blogs = mappers().project_rows(&rows, "blog.blog").unwrap();

    assert_eq!(blogs.len(), 2);

    let first = blogs[0].expect_record();
    assert_eq!(first.get("title"), Some(&Value::from("First")));
    assert_eq!(
        first.get("posts"),
        Some(&Value::List(vec![
            record(
                "Post",
                &[
                    ("id", 10i64.into()),
                    ("subject", "hello".into()),
                    ("views", Value::I32(5)),
                ]
            ),
            record(
                "Post",
                &[
                    ("id", 11i64.into()),
                    ("subject", "again".into()),
                    ("views", Value::Null),
                ]
            ),
        ]))
    );

    let second = blogs[1].expect_record();
    assert_eq!(second.get("title"), Some(&Value::from("Second")));
    assert_eq!(second.get("posts"), Some(&Value::List(vec![])));
}

#[test]
fn duplicate_nested_rows_collapse() {
    let line = |sku: &str, qty: i64| {
        row(&[
            ("order_id", 1i64.into()),
            ("line_sku", sku.into()),
            ("line_qty", qty.into()),
        ])
    };

    let rows = [line("a", 1), line("b", 2), line("a", 1)];

    let orders = mappers().project_rows(&rows, "blog.inline").unwrap();

    assert_eq!(
        orders,
        [record(
            "Order",
            &[
                ("id", 1i64.into()),
                (
                    "lines",
                    Value::List(vec![
                        record("Line", &[("sku", "a".into()), ("qty", Value::I32(1))]),
                        record("Line", &[("sku", "b".into()), ("qty", Value::I32(2))]),
                    ])
                ),
            ]
        )]
    );
}

#[test]
fn rows_without_ids_stay_separate() {
    let rows = [
        row(&[("blog_title", "a".into())]),
        row(&[("blog_title", "a".into())]),
    ];

    let blogs = mappers().project_rows(&rows, "blog.blog").unwrap();

    assert_eq!(blogs.len(), 2);
}

#[test]
fn empty_result_set() {
    assert!(mappers().project_rows(&[], "blog.blog").unwrap().is_empty());
}

// --- recursive result maps ---

const TREE: &str = r#"<mapper namespace="cat">
  <resultMap id="node" type="Category">
    <id property="id" column="id"/>
    <result property="name" column="name"/>
    <association property="parent" resultMap="node" columnPrefix="parent_"/>
  </resultMap>

  <resultMap id="folder" type="Folder">
    <id property="id" column="id"/>
    <collection property="children" resultMap="folder"/>
  </resultMap>

  <resultMap id="shelf" type="Shelf">
    <id property="id" column="id"/>
    <collection property="books" resultMap="book" columnPrefix="book_"/>
  </resultMap>

  <resultMap id="book" type="Book">
    <id property="id" column="id"/>
    <result property="title" column="title"/>
  </resultMap>
</mapper>"#;

fn tree() -> Mappers {
    Mappers::builder().mapper_str(TREE).build().unwrap()
}

#[test]
fn self_referencing_association_stops_at_missing_prefix() {
    let row = row(&[
        ("id", 2i64.into()),
        ("name", "child".into()),
        ("parent_id", 1i64.into()),
        ("parent_name", "root".into()),
    ]);

    let value = tree().project(&row, "cat.node").unwrap();

    assert_eq!(
        value,
        record(
            "Category",
            &[
                ("id", 2i64.into()),
                ("name", "child".into()),
                (
                    "parent",
                    record(
                        "Category",
                        &[
                            ("id", 1i64.into()),
                            ("name", "root".into()),
                            ("parent", Value::Null),
                        ]
                    )
                ),
            ]
        )
    );
}

#[test]
fn self_referencing_collection_without_prefix_terminates() {
    let rows = [row(&[("id", 1i64.into())]), row(&[("id", 2i64.into())])];

    let folders = tree().project_rows(&rows, "cat.folder").unwrap();

    assert_eq!(folders.len(), 2);
    for folder in &folders {
        assert!(folder.expect_record().contains_key("children"));
    }
}

#[test]
fn prefixed_collection_without_columns_is_empty() {
    let rows = [
        row(&[("id", 1i64.into())]),
        row(&[("id", 1i64.into())]),
    ];

    let shelves = tree().project_rows(&rows, "cat.shelf").unwrap();

    assert_eq!(
        shelves,
        [record(
            "Shelf",
            &[("id", 1i64.into()), ("books", Value::List(vec![]))]
        )]
    );
}

#[test]
fn prefixed_collection_gathers_present_columns() {
    let rows = [
        row(&[
            ("id", 1i64.into()),
            ("book_id", 10i64.into()),
            ("book_title", "Dune".into()),
        ]),
        row(&[
            ("id", 1i64.into()),
            ("book_id", Value::Null),
            ("book_title", Value::Null),
        ]),
    ];

    let shelves = tree().project_rows(&rows, "cat.shelf").unwrap();
    let books = shelves[0].expect_record().get("books").cloned();

    assert_eq!(
        books,
        Some(Value::List(vec![record(
            "Book",
            &[("id", 10i64.into()), ("title", "Dune".into())]
        )]))
    );
}
