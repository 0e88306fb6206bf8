use bugreport::{
    bugreport,
    collector::{CompileTimeInformation, EnvironmentVariables, OperatingSystem, SoftwareVersion},
    format::Markdown,
};

pub fn run() {
    bugreport!()
        .info(SoftwareVersion::default())
        .info(OperatingSystem::default())
        .info(EnvironmentVariables::list(&[
            "SHELL",
            "TERM",
            "RUST_LOG",
            "FOLIO_PORT",
            "CLOUDINARY_API_BASE",
            "CLOUDINARY_CLOUD_NAME",
        ]))
        .info(CompileTimeInformation::default())
        .print::<Markdown>();
}
