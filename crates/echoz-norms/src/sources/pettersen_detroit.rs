use std::sync::LazyLock;

use crate::NormativeSource;
use crate::registry::{Parameter, ParameterRegistry};

/// Pettersen MD et al., Detroit Data.
/// Paediatric echocardiographic Z-scores indexed to BSA^alpha.
/// Parameters with alpha = 0 are not scaled by body size.
pub struct PettersenDetroit;

/// (name, alpha, mean, sd, description)
const TABLE: &[(&str, f64, f64, f64, &str)] = &[
    ("MVAP", 0.50, 2.31, 0.24, "Mitral valve annulus (AP)"),
    ("MVLAT", 0.50, 2.23, 0.22, "Mitral valve annulus (LAT)"),
    ("MVA", 1.00, 4.06, 0.68, "Mitral valve area"),
    ("TVAP", 0.50, 2.36, 0.28, "Tricuspid valve annulus (AP)"),
    ("TVLAT", 0.50, 2.36, 0.29, "Tricuspid valve annulus (LAT)"),
    ("TVA", 1.00, 4.39, 0.83, "Tricuspid valve area"),
    ("ANN", 0.50, 1.48, 0.14, "Aortic annulus"),
    ("ROOT", 0.50, 2.06, 0.18, "Aortic root"),
    ("STJ", 0.50, 1.69, 0.16, "Sinotubular junction"),
    ("AAO", 0.50, 1.79, 0.18, "Ascending aorta"),
    ("ARCHPROX", 0.50, 1.53, 0.23, "Aortic arch proximal"),
    ("ARCHDIST", 0.50, 1.36, 0.19, "Aortic arch distal"),
    ("ISTH", 0.50, 1.25, 0.18, "Aortic isthmus"),
    ("LMCA", 0.45, 2.95, 0.57, "Left main coronary artery"),
    ("LAD", 0.45, 1.90, 0.34, "Left anterior descending artery"),
    ("RCA", 0.45, 2.32, 0.55, "Right coronary artery"),
    ("PVSAX", 0.50, 1.91, 0.24, "Pulmonary valve (SAX)"),
    ("PVLAX", 0.50, 2.01, 0.28, "Pulmonary valve (LAX)"),
    ("MPA", 0.50, 1.82, 0.24, "Main pulmonary artery"),
    ("RPA", 0.50, 1.07, 0.18, "Right pulmonary artery"),
    ("LPA", 0.50, 1.10, 0.18, "Left pulmonary artery"),
    ("LVEDD", 0.45, 3.89, 0.33, "LV end-diastolic diameter"),
    ("LVPWT", 0.40, 0.57, 0.09, "LV posterior wall thickness (diastole)"),
    ("LVST", 0.40, 0.58, 0.09, "LV septal thickness (diastole)"),
    ("LVEDL", 0.45, 6.31, 0.46, "LV end-diastolic length"),
    ("LVEDLEPI", 0.45, 6.87, 0.45, "LV end-diastolic length (epi)"),
    ("LVEDA", 0.90, 11.91, 1.89, "LV end-diastolic area"),
    ("LVEDAEPI", 0.90, 20.00, 2.59, "LV end-diastolic area (epi)"),
    ("LVEDV", 1.30, 62.02, 11.94, "LV end-diastolic volume"),
    ("LVEDVEPI", 1.30, 113.14, 17.85, "LV end-diastolic volume (epi)"),
    ("LVM", 1.25, 53.02, 9.06, "LV mass"),
    ("LVMTV", 0.00, 0.88, 0.16, "LV mass to volume ratio"),
    ("LVTTD", 0.00, 0.15, 0.03, "LV wall thickness to diameter ratio"),
    ("LVSI", 0.00, 1.63, 0.17, "LV sphericity index"),
];

impl NormativeSource for PettersenDetroit {
    fn id(&self) -> &str {
        "pettersen_detroit"
    }

    fn name(&self) -> &str {
        "Pettersen / Detroit"
    }

    fn citation(&self) -> &str {
        "Pettersen MD, Du W, Skeens ME, Humes RA. Regression equations for calculation \
         of z scores of cardiac structures in a large cohort of healthy infants, children, \
         and adolescents: an echocardiographic study. J Am Soc Echocardiogr. \
         2008;21(8):922-34."
    }

    fn registry(&self) -> &ParameterRegistry {
        static REGISTRY: LazyLock<ParameterRegistry> = LazyLock::new(|| {
            let params = TABLE.iter().map(|&(name, alpha, mean, sd, description)| {
                Parameter::new(name, alpha, mean, sd).with_description(description)
            });
            ParameterRegistry::from_parameters(params)
                .expect("built-in Pettersen/Detroit table has unique names")
        });
        &REGISTRY
    }
}
