//! Upload template and seeded synthetic records.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use regime_scorer::{InputRecord, AGE_GROUPS};

/// The three example rows offered as a download next to the batch upload.
pub fn template() -> Vec<InputRecord> {
  [
    ["Masculino", "19 a 45", "COTIZANTE", "BOGOTA D.C.", "BOGOTA", "Urbana", "1", "Activo", "NO APLICA"],
    ["Femenino", "45 a 50", "BENEFICIARIO", "ANTIOQUIA", "MEDELLIN", "Urbana", "2", "Activo", "ESTUDIANTE"],
    ["Masculino", "60 a 65", "CABEZA DE FAMILIA", "VALLE", "CALI", "Rural", "NO APLICA", "Inactivo", "NO APLICA"],
  ]
  .into_iter()
  .map(|[g, age, tipo, dep, mun, zona, sisben, estado, cond]| InputRecord {
    genero: Some(g.into()),
    grupo_etario: Some(age.into()),
    regimen: None,
    tipo_afiliado: Some(tipo.into()),
    departamento: Some(dep.into()),
    municipio: Some(mun.into()),
    zona: Some(zona.into()),
    nivel_sisben: Some(sisben.into()),
    estado_afiliado: Some(estado.into()),
    condicion_beneficiario: Some(cond.into()),
  })
  .collect()
}

const AGE_WEIGHTS: [f64; 12] = [0.02, 0.05, 0.08, 0.1, 0.25, 0.15, 0.12, 0.08, 0.06, 0.05, 0.03, 0.01];
const DEPARTAMENTOS: [(&str, f64); 9] = [
  ("BOGOTA D.C.", 0.2),
  ("ANTIOQUIA", 0.15),
  ("VALLE", 0.12),
  ("CUNDINAMARCA", 0.1),
  ("ATLANTICO", 0.08),
  ("SANTANDER", 0.08),
  ("BOLIVAR", 0.07),
  ("NARIÑO", 0.1),
  ("BOYACA", 0.1),
];
const MUNICIPIOS: [&str; 8] = [
  "BOGOTA", "MEDELLIN", "CALI", "BARRANQUILLA", "CARTAGENA", "BUCARAMANGA", "CUCUTA", "VILLAVICENCIO",
];

/// `count` synthetic records drawn with fixed category frequencies.
/// The same seed always yields the same records.
pub fn generate(count: usize, seed: u64) -> Vec<InputRecord> {
  let mut rng = StdRng::seed_from_u64(seed);
  let ages: Vec<(&str, f64)> = AGE_GROUPS.iter().copied().zip(AGE_WEIGHTS).collect();

  (0..count)
    .map(|_| InputRecord {
      genero: Some(pick(&mut rng, &[("Masculino", 0.48), ("Femenino", 0.52)])),
      grupo_etario: Some(pick(&mut rng, &ages)),
      regimen: Some(pick(&mut rng, &[("Contributivo", 0.4), ("Subsidiado", 0.6)])),
      tipo_afiliado: Some(pick(
        &mut rng,
        &[("COTIZANTE", 0.4), ("BENEFICIARIO", 0.4), ("CABEZA DE FAMILIA", 0.2)],
      )),
      departamento: Some(pick(&mut rng, &DEPARTAMENTOS)),
      municipio: MUNICIPIOS.choose(&mut rng).map(|m| (*m).to_string()),
      zona: Some(pick(
        &mut rng,
        &[("Urbana", 0.7), ("Rural", 0.2), ("Urbana-Cabecera Municipal", 0.1)],
      )),
      nivel_sisben: Some(pick(
        &mut rng,
        &[("1", 0.4), ("2", 0.3), ("3", 0.15), ("4", 0.1), ("NO APLICA", 0.05)],
      )),
      estado_afiliado: Some(pick(
        &mut rng,
        &[("Activo", 0.85), ("Inactivo", 0.1), ("Protección Laboral C", 0.05)],
      )),
      condicion_beneficiario: None,
    })
    .collect()
}

/// Weighted choice. Weights are positive constants, so the choice only fails
/// on an empty slice, which yields an empty string.
fn pick(rng: &mut StdRng, choices: &[(&str, f64)]) -> String {
  choices
    .choose_weighted(rng, |(_, w)| *w)
    .map(|(v, _)| (*v).to_string())
    .unwrap_or_default()
}
