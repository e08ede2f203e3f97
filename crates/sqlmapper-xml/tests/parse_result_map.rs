use pretty_assertions::assert_eq;
use sqlmapper_core::mapper::{NestedKind, NestedTarget, ResultMapping};

const BLOG: &str = r#"<mapper namespace="blog">
  <resultMap id="authorMap" type="Author">
    <id property="id" column="author_id"/>
    <result property="username" column="author_username" javaType="string"/>
  </resultMap>

  <resultMap id="blogMap" type="com.example.Blog" autoMapping="true">
    <constructor>
      <idArg column="blog_id" javaType="long"/>
      <arg name="title" column="blog_title"/>
    </constructor>
    <result property="createdOn" column="created_on" javaType="date" jdbcType="DATE"/>
    <association property="author" resultMap="authorMap" columnPrefix="a_"/>
    <collection property="posts" ofType="Post">
      <id property="id" column="post_id"/>
      <result property="subject" column="post_subject"/>
    </collection>
    <collection property="comments" select="comments.byBlog" column="blog_id"/>
    <discriminator javaType="int" column="draft"/>
  </resultMap>

  <resultMap id="detailedBlogMap" type="Blog" extends="blogMap">
    <result property="views" column="view_count" javaType="int"/>
  </resultMap>
</mapper>"#;

fn mapping(property: &str, column: &str) -> ResultMapping {
    ResultMapping {
        property: property.to_string(),
        column: column.to_string(),
        ..ResultMapping::default()
    }
}

#[test]
fn ids_and_results() {
    let mapper = sqlmapper_xml::parse(BLOG).unwrap();
    let author = mapper.result_map("authorMap").unwrap();

    assert_eq!(author.qualified_id(), "blog.authorMap");
    assert_eq!(author.ty.as_deref(), Some("Author"));
    assert!(!author.auto_mapping);
    assert_eq!(author.ids, [mapping("id", "author_id")]);
    assert_eq!(
        author.results,
        [ResultMapping {
            java_type: Some("string".to_string()),
            ..mapping("username", "author_username")
        }]
    );
}

#[test]
fn constructor_arguments() {
    let mapper = sqlmapper_xml::parse(BLOG).unwrap();
    let blog = mapper.result_map("blogMap").unwrap();

    assert!(blog.auto_mapping);
    assert_eq!(
        blog.ids,
        [ResultMapping {
            java_type: Some("long".to_string()),
            ..mapping("blog_id", "blog_id")
        }]
    );
    assert_eq!(blog.results[0], mapping("title", "blog_title"));
    assert_eq!(blog.results[1].jdbc_type.as_deref(), Some("DATE"));
}

#[test]
fn nested_mappings() {
    let mapper = sqlmapper_xml::parse(BLOG).unwrap();
    let blog = mapper.result_map("blogMap").unwrap();

    assert_eq!(blog.nested.len(), 3);

    let author = &blog.nested[0];
    assert_eq!(author.kind, NestedKind::Association);
    assert_eq!(author.target, NestedTarget::Ref("blog.authorMap".to_string()));
    assert_eq!(author.column_prefix.as_deref(), Some("a_"));

    let posts = &blog.nested[1];
    assert_eq!(posts.kind, NestedKind::Collection);
    assert_eq!(posts.ty.as_deref(), Some("Post"));
    let NestedTarget::Inline(inline) = &posts.target else {
        panic!("expected an inline result map; got {:?}", posts.target);
    };
    assert_eq!(inline.ids, [mapping("id", "post_id")]);
    assert_eq!(inline.results, [mapping("subject", "post_subject")]);
    assert!(inline.auto_mapping);

    assert_eq!(
        blog.nested[2].target,
        NestedTarget::Select {
            statement: "comments.byBlog".to_string(),
            column: Some("blog_id".to_string()),
        }
    );
}

#[test]
fn extends_is_qualified() {
    let mapper = sqlmapper_xml::parse(BLOG).unwrap();
    let detailed = mapper.result_map("detailedBlogMap").unwrap();

    assert_eq!(detailed.extends.as_deref(), Some("blog.blogMap"));

    let merged = detailed.inherit(mapper.result_map("blogMap").unwrap());
    let properties: Vec<_> = merged.mappings().map(|m| m.property.as_str()).collect();
    assert_eq!(properties, ["blog_id", "title", "createdOn", "views"]);
    assert_eq!(merged.nested.len(), 3);
    assert_eq!(merged.ty.as_deref(), Some("Blog"));
}

#[test]
fn unexpected_child() {
    let err = sqlmapper_xml::parse(
        r#"<mapper namespace="m"><resultMap id="r"><column name="x"/></resultMap></mapper>"#,
    )
    .unwrap_err();

    assert!(err.is_invalid_mapper());
    assert!(err
        .to_string()
        .contains("unexpected `<column name=\"x\">` inside `<resultMap>`"));
}

#[test]
fn duplicate_result_map() {
    let err = sqlmapper_xml::parse(
        r#"<mapper namespace="m"><resultMap id="r"/><resultMap id="r"/></mapper>"#,
    )
    .unwrap_err();

    assert!(err.to_string().contains("duplicate result map id"));
}
