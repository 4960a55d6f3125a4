use seird::Parameters;
use serde::Deserialize;

/// Model input section of a run request.
#[derive(Debug, Clone, Deserialize)]
pub struct RunInput {
    #[serde(flatten)]
    pub parameters: Parameters,
    #[serde(default)]
    pub max_days: Option<usize>,
    #[serde(default = "default_replicates")]
    pub replicates: u64,
}

fn default_replicates() -> u64 {
    1
}

#[cfg(test)]
mod test {
    use seird::Parameters;
    use serde_json::json;

    use super::RunInput;
    use crate::environment::Environment;

    #[test]
    fn test_minimal_input() {
        let env = Environment::from_json(json!({"input": {"seed": 5, "population": 1000}}))
            .with_input_type::<RunInput>()
            .unwrap();
        assert_eq!(env.input.parameters, Parameters::new(1000));
        assert_eq!(env.input.max_days, None);
        assert_eq!(env.input.replicates, 1);
        assert_eq!(env.seed, 5);
    }

    #[test]
    fn test_full_input() {
        let env = Environment::from_json(json!({
            "input": {
                "population": 200,
                "beta": 0.5,
                "gamma": 0.25,
                "sigma": 0.1,
                "mortality": 0.05,
                "max_days": 365,
                "replicates": 4
            }
        }))
        .with_input_type::<RunInput>()
        .unwrap();
        let expected = Parameters::new(200)
            .with_beta(0.5)
            .with_gamma(0.25)
            .with_sigma(0.1)
            .with_mortality(0.05);
        assert_eq!(env.input.parameters, expected);
        assert_eq!(env.input.max_days, Some(365));
        assert_eq!(env.input.replicates, 4);
    }

    #[test]
    fn test_population_required() {
        let env = Environment::from_json(json!({"input": {"beta": 0.5}}));
        assert!(env.with_input_type::<RunInput>().is_err());
    }
}
