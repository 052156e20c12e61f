//! Runtime configuration: lookup tables, defaults and the fetch plan built
//! from `get-goes` arguments.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{info, warn};

use goes_common::{
    BandSelection, BandTable, BoundingBox, DomainTable, Era, GoesResult, ProductRequest, Scene,
    TimeWindow,
};

use crate::cli::GetGoesArgs;

/// Default number of units in flight.
pub const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Default directory searched for `domains.yaml` and `bands.yaml`.
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Prefix of the output directory created when none is given.
const OUTPUT_DIR_PREFIX: &str = "DATA_";

/// Both lookup tables, validated at startup.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub domains: DomainTable,
    pub bands: BandTable,
}

impl Tables {
    pub fn load(config_dir: &Path) -> GoesResult<Self> {
        Ok(Self {
            domains: DomainTable::load(config_dir)?,
            bands: BandTable::load(config_dir)?,
        })
    }
}

/// `{base}/DATA_YYYYmmdd-HHMM`.
pub fn default_output_dir(base: &Path, now: NaiveDateTime) -> PathBuf {
    base.join(format!("{}{}", OUTPUT_DIR_PREFIX, now.format("%Y%m%d-%H%M")))
}

/// Which archive serves the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Archive {
    /// GOES-R buckets on S3.
    GoesR {
        scene: Scene,
        request: ProductRequest,
    },
    /// GOES-N GridSat-CONUS over HTTPS.
    GridSat,
    /// Window crosses 2017-03-01.
    Unsupported,
}

/// A validated `get-goes` invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchPlan {
    pub window: TimeWindow,
    pub archive: Archive,
    pub domain: Option<BoundingBox>,
    /// `None` means "create the default directory".
    pub output_dir: Option<PathBuf>,
}

impl FetchPlan {
    /// Check every argument before any network or disk work.
    pub fn from_args(args: &GetGoesArgs, domains: &DomainTable) -> GoesResult<Self> {
        let window = TimeWindow::parse(&args.start_time, &args.end_time)?;
        let scene: Scene = args.goes_domain.parse()?;
        let domain = args.domain.resolve(domains)?;

        let archive = match window.era() {
            Era::GoesR => {
                let bands = args.bands.as_deref().map(BandSelection::parse).transpose()?;
                Archive::GoesR {
                    scene,
                    request: ProductRequest::new(bands, args.glm)?,
                }
            }
            Era::Legacy => {
                if domain.is_some() {
                    warn!("Domain reduction is not applied to GridSat files");
                }
                Archive::GridSat
            }
            Era::Straddling => Archive::Unsupported,
        };

        info!(window = %window, archive = ?archive, "Fetch plan ready");
        Ok(Self {
            window,
            archive,
            domain,
            output_dir: args.local_path.clone(),
        })
    }

    /// The requested directory, or a fresh `DATA_*` one under `cwd`. Created if missing.
    pub fn prepare_output_dir(&self, cwd: &Path, now: NaiveDateTime) -> std::io::Result<PathBuf> {
        let dir = match &self.output_dir {
            Some(dir) => dir.clone(),
            None => {
                let dir = default_output_dir(cwd, now);
                info!(path = %dir.display(), "Creating output directory");
                dir
            }
        };
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clap::Parser;
    use goes_common::GoesError;

    fn args(extra: &[&str]) -> GetGoesArgs {
        let mut argv = vec!["get-goes"];
        argv.extend_from_slice(extra);
        GetGoesArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_default_output_dir() {
        let now = NaiveDate::from_ymd_opt(2020, 5, 24)
            .unwrap()
            .and_hms_opt(3, 7, 0)
            .unwrap();
        assert_eq!(
            default_output_dir(Path::new("/work"), now),
            PathBuf::from("/work/DATA_20200524-0307")
        );
    }

    #[test]
    fn test_plan_goes_r() {
        let plan = FetchPlan::from_args(
            &args(&["2020-05-23/1200", "2020-05-23/1205", "-b", "2,5", "-d", "MW"]),
            &DomainTable::builtin(),
        )
        .unwrap();
        let Archive::GoesR { scene, request } = plan.archive else {
            panic!("expected a GOES-R plan");
        };
        assert_eq!(scene, Scene::default());
        assert_eq!(request.bands.unwrap().bands(), &[2, 5]);
        assert!(plan.domain.is_some());
    }

    #[test]
    fn test_plan_requires_bands_or_glm() {
        let result = FetchPlan::from_args(
            &args(&["2020-05-23/1200", "2020-05-23/1205"]),
            &DomainTable::builtin(),
        );
        assert!(matches!(result, Err(GoesError::Usage(_))));
    }

    #[test]
    fn test_plan_rejects_bad_times() {
        let bad_format = FetchPlan::from_args(
            &args(&["2020-05-23 12:00", "2020-05-23/1205", "-g"]),
            &DomainTable::builtin(),
        );
        assert!(matches!(bad_format, Err(GoesError::InvalidTime(_))));

        let reversed = FetchPlan::from_args(
            &args(&["2020-05-23/1300", "2020-05-23/1205", "-g"]),
            &DomainTable::builtin(),
        );
        assert!(matches!(reversed, Err(GoesError::InvalidWindow { .. })));
    }

    #[test]
    fn test_plan_eras() {
        let legacy = FetchPlan::from_args(
            &args(&["2016-01-01/0000", "2016-01-01/0100"]),
            &DomainTable::builtin(),
        )
        .unwrap();
        assert_eq!(legacy.archive, Archive::GridSat);

        let straddling = FetchPlan::from_args(
            &args(&["2017-02-28/2300", "2017-03-01/0100", "-g"]),
            &DomainTable::builtin(),
        )
        .unwrap();
        assert_eq!(straddling.archive, Archive::Unsupported);
    }

    #[test]
    fn test_prepare_output_dir_creates_default() {
        let cwd = test_utils::temp_test_dir_with_prefix("goes_cwd_");
        let plan = FetchPlan::from_args(
            &args(&["2020-05-23/1200", "2020-05-23/1205", "-g"]),
            &DomainTable::builtin(),
        )
        .unwrap();
        if plan.output_dir.is_some() {
            // GOES_OUTPUT_DIR is set in this environment
            return;
        }
        let now = NaiveDate::from_ymd_opt(2020, 5, 24)
            .unwrap()
            .and_hms_opt(3, 7, 0)
            .unwrap();
        let dir = plan.prepare_output_dir(cwd.path(), now).unwrap();
        assert!(dir.is_dir());
        assert!(dir.ends_with("DATA_20200524-0307"));
    }
}
