//! Deserializadores tolerantes
//!
//! El frontend histórico enviaba números como cadenas, booleanos
//! ausentes y arreglos como `null`; estos helpers reproducen la
//! coerción `Number(x) || 0` y "no-arreglo se trata como vacío" que
//! aplicaban los controladores originales.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

/// bool que trata `null`/ausente como `true`
pub fn bool_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(true))
}

/// bool que trata `null`/ausente como `false`
pub fn bool_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(false))
}

fn coerce_f64(v: &Value) -> f64 {
    let n = match v {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() { n.max(0.0) } else { 0.0 }
}

/// Número no negativo; cadena numérica se acepta, cualquier otra cosa es 0
pub fn numero_f64_laxo<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(coerce_f64(&v))
}

/// Entero no negativo con la misma coerción que [`numero_f64_laxo`]
pub fn numero_u32_laxo<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(coerce_f64(&v) as u32)
}

/// `Option` de [`numero_f64_laxo`]: el campo presente (aunque sea nulo
/// o basura) se coerciona; el ausente queda `None` vía `#[serde(default)]`.
pub fn opt_numero_f64_laxo<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(Some(coerce_f64(&v)))
}

/// `Option` de [`numero_u32_laxo`]
pub fn opt_numero_u32_laxo<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(Some(coerce_f64(&v) as u32))
}

/// Arreglo tolerante: `null` o cualquier no-arreglo es vacío, y los
/// elementos que no deserializan al tipo esperado se descartan.
pub fn vec_o_vacio<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let v = Value::deserialize(deserializer)?;
    match v {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Payload {
        #[serde(default, deserialize_with = "super::numero_f64_laxo")]
        precio: f64,
        #[serde(default, deserialize_with = "super::numero_u32_laxo")]
        duracion: u32,
        #[serde(default, deserialize_with = "super::vec_o_vacio")]
        dias: Vec<String>,
    }

    #[test]
    fn coerciona_numeros() {
        let p: Payload =
            serde_json::from_str(r#"{"precio": "150.5", "duracion": 30}"#).unwrap();
        assert_eq!(p.precio, 150.5);
        assert_eq!(p.duracion, 30);
    }

    #[test]
    fn basura_numerica_es_cero() {
        let p: Payload =
            serde_json::from_str(r#"{"precio": "gratis", "duracion": null}"#).unwrap();
        assert_eq!(p.precio, 0.0);
        assert_eq!(p.duracion, 0);
    }

    #[test]
    fn negativos_se_acotan_a_cero() {
        let p: Payload = serde_json::from_str(r#"{"precio": -10}"#).unwrap();
        assert_eq!(p.precio, 0.0);
    }

    #[test]
    fn no_arreglo_es_vacio() {
        let p: Payload = serde_json::from_str(r#"{"dias": "2025-12-11"}"#).unwrap();
        assert!(p.dias.is_empty());
        let p: Payload = serde_json::from_str(r#"{"dias": ["a", "b"]}"#).unwrap();
        assert_eq!(p.dias.len(), 2);
    }
}
