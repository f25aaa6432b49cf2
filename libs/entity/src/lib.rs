pub mod contact;
pub mod post;
pub mod user;

pub mod prelude {
    pub use crate::contact::{
        Contact as ContactEntity, ContactStatus, NewContact,
    };
    pub use crate::post::{
        NewPost, Post as PostEntity, PostStatus, UpdatePost,
    };
    pub use crate::user::{NewUser, User as UserEntity};
}
