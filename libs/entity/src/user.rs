#[derive(Debug, Default, PartialEq, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Default, PartialEq, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}
