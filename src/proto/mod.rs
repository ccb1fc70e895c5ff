// Generated by build.rs from proto/abelana.proto

pub mod abelana {
    include!("abelanav2.grpc.rs");
}

pub use abelana::*;
