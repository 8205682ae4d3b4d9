use easy_builder::{easy_builder, BuildError};

#[derive(PartialEq, Debug)]
#[easy_builder]
struct Person {
    #[builder(default = "Default name".to_string())]
    name: String,
    #[builder(required)]
    age: i32,
    #[builder(skip)]
    height: f64,
    parent: Option<Box<Self>>,
}

#[test]
fn required_field_missing() {
    let error = Person::builder().Name("Bob".to_string()).build().unwrap_err();

    assert_eq!(error.type_name(), "Person");
    assert_eq!(error.missing_fields(), ["age"]);
}

#[test]
fn default_title_case_setters() {
    let actual = Person::builder()
        .Name("Bob".to_string())
        .Age(18)
        .build()
        .unwrap();
    let expected = Person {
        name: "Bob".to_string(),
        age: 18,
        height: 0.0,
        parent: None,
    };
    assert_eq!(actual, expected);
}

#[test]
fn default_expression_seeds_slot() {
    assert_eq!(PersonBuilder::default()._name, "Default name");

    let person = Person::builder().Age(30).build().unwrap();
    assert_eq!(person.name, "Default name");
}

#[test]
fn nested_builders() {
    let parent = Person::builder()
        .Name("Alice".to_string())
        .Age(60)
        .build()
        .unwrap();
    let child = Person::builder()
        .Age(30)
        .Parent(Some(Box::new(parent)))
        .build()
        .unwrap();

    assert_eq!(child.parent.unwrap().name, "Alice");
}

#[derive(PartialEq, Debug)]
#[easy_builder(setter_case = "snake")]
#[allow(non_snake_case)]
struct Account {
    displayName: String,
    email_address: String,
    #[builder(default)]
    active: bool,
}

#[test]
fn snake_case_setters() {
    let actual = Account::builder()
        .display_name("Bob".to_string())
        .email_address("bob@example.com".to_string())
        .build()
        .unwrap();
    let expected = Account {
        displayName: "Bob".to_string(),
        email_address: "bob@example.com".to_string(),
        active: false,
    };
    assert_eq!(actual, expected);
}

#[derive(Debug)]
#[easy_builder]
struct Registration {
    #[builder(required)]
    username: String,
    nickname: String,
    #[builder(required)]
    password: String,
    #[builder(required, default = 1)]
    plan: u32,
}

#[test]
fn missing_fields_in_declaration_order() {
    let error = Registration::builder()
        .Nickname("b".to_string())
        .build()
        .unwrap_err();

    assert_eq!(error.missing_fields(), ["username", "password", "plan"]);
    assert_eq!(
        error.to_string(),
        "cannot build `Registration`: missing required field(s) username, password, plan"
    );
}

#[test]
fn required_with_default_must_be_set() {
    let error = Registration::builder()
        .Username("bob".to_string())
        .Password("hunter2".to_string())
        .build()
        .unwrap_err();
    assert_eq!(error.missing_fields(), ["plan"]);

    let registration = Registration::builder()
        .Username("bob".to_string())
        .Password("hunter2".to_string())
        .Plan(1)
        .build()
        .unwrap();
    assert_eq!(registration.plan, 1);
    assert_eq!(registration.nickname, "");
}

#[test]
fn later_setter_wins() {
    let registration = Registration::builder()
        .Username("first".to_string())
        .Username("second".to_string())
        .Password("p".to_string())
        .Plan(2)
        .build()
        .unwrap();

    assert_eq!(registration.username, "second");
}

#[derive(PartialEq, Debug)]
#[easy_builder]
struct Point(
    #[builder(setter = x)] i32,
    #[builder(setter = y, default = -1)] i32,
    #[builder(skip)] u8,
);

#[test]
fn tuple_struct_setters() {
    assert_eq!(Point::builder().x(3).y(4).build().unwrap(), Point(3, 4, 0));
    assert_eq!(Point::builder().x(3).build().unwrap(), Point(3, -1, 0));
}

#[derive(PartialEq, Debug)]
#[easy_builder]
struct Renamed {
    #[builder(setter = "with_label")]
    label: String,
}

#[test]
fn renamed_setter() {
    let renamed = Renamed::builder()
        .with_label("tag".to_string())
        .build()
        .unwrap();

    assert_eq!(renamed.label, "tag");
}

#[derive(PartialEq, Debug)]
#[easy_builder(crate = ::easy_builder)]
struct CustomCrate {
    value: u32,
}

#[test]
fn custom_crate_path() {
    assert_eq!(
        CustomCrate::builder().Value(7).build().unwrap(),
        CustomCrate { value: 7 }
    );
}

#[derive(PartialEq, Debug)]
#[easy_builder]
struct Empty {}

#[test]
fn empty_struct() {
    assert_eq!(Empty::builder().build().unwrap(), Empty {});
}

#[test]
fn build_error() {
    let error = BuildError::new("Person", vec!["age"]);

    assert_eq!(
        error.to_string(),
        "cannot build `Person`: missing required field(s) age"
    );
    assert_eq!(error, error.clone());
}

mod nested {
    use easy_builder::easy_builder;

    #[easy_builder]
    pub struct Config {
        pub path: String,
        #[builder(default = 8080)]
        pub port: u16,
    }
}

#[test]
fn builder_lives_beside_type() {
    let config = nested::ConfigBuilder::default()
        .Path("/srv".to_string())
        .build()
        .unwrap();

    assert_eq!(config.path, "/srv");
    assert_eq!(config.port, 8080);
}

#[derive(PartialEq, Debug)]
#[easy_builder]
struct Node {
    value: u32,
    next: Option<Box<Self>>,
}

#[test]
fn self_typed_field() {
    let tail = Node::builder().Value(2).build().unwrap();
    let head = Node::builder()
        .Value(1)
        .Next(Some(Box::new(tail)))
        .build()
        .unwrap();

    assert_eq!(head.next.unwrap().value, 2);
}

struct Connection {
    port: u16,
}

impl Connection {
    fn on(port: u16) -> Self {
        Connection { port }
    }
}

#[easy_builder]
struct Server {
    host: String,
    #[builder(skip, default = 5432)]
    port: u16,
    #[builder(skip, default = Connection::on(80))]
    connection: Connection,
}

#[test]
fn skipped_field_default() {
    let server = Server::builder().Host("db".to_string()).build().unwrap();

    assert_eq!(server.host, "db");
    assert_eq!(server.port, 5432);
    assert_eq!(server.connection.port, 80);
}
