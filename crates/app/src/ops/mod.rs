pub mod copy;
pub mod init;
pub mod ls;
pub mod sign_in;
pub mod sign_out;
pub mod upload;
pub mod version;

pub use copy::CopyCid;
pub use init::Init;
pub use ls::Ls;
pub use sign_in::SignIn;
pub use sign_out::SignOut;
pub use upload::Upload;
pub use version::Version;
