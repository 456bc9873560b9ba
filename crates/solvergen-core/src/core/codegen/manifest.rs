use crate::core::models::project::ProjectConfig;
use crate::core::templates::SUPPORT_LIBRARY_DIR;
use serde::Serialize;

pub const MANIFEST_FILE_NAME: &str = "Cargo.toml";
pub const MANIFEST_EDITION: &str = "2018";

#[derive(Serialize)]
struct Manifest<'a> {
    package: Package<'a>,
    dependencies: Dependencies<'a>,
}

#[derive(Serialize)]
struct Package<'a> {
    name: &'a str,
    version: &'a str,
    license: &'a str,
    authors: &'a [String],
    edition: &'static str,
    publish: bool,
}

#[derive(Serialize)]
struct Dependencies<'a> {
    optimization_engine: PathDependency<'a>,
    icasadi: PathDependency<'a>,
    serde: VersionDependency,
    serde_json: &'static str,
}

#[derive(Serialize)]
struct PathDependency<'a> {
    path: &'a str,
}

#[derive(Serialize)]
struct VersionDependency {
    version: &'static str,
    features: &'static [&'static str],
}

/// Renders the package manifest of the generated project.
///
/// The dependency set is fixed: the optimizer core library, the static support
/// library shipped inside the project, and `serde`/`serde_json` pinned to major
/// version 1 for the solver's wire format.
pub fn generate_manifest(config: &ProjectConfig) -> Result<String, toml::ser::Error> {
    let identity = &config.identity;
    let support_path = format!("./{}/", SUPPORT_LIBRARY_DIR);
    let manifest = Manifest {
        package: Package {
            name: &identity.name,
            version: &identity.version,
            license: &identity.license,
            authors: &identity.authors,
            edition: MANIFEST_EDITION,
            publish: false,
        },
        dependencies: Dependencies {
            optimization_engine: PathDependency {
                path: &config.build.optimizer_path,
            },
            icasadi: PathDependency {
                path: &support_path,
            },
            serde: VersionDependency {
                version: "1.0",
                features: &["derive"],
            },
            serde_json: "1.0",
        },
    };
    toml::to_string(&manifest)
}
