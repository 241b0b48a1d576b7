mod expand_scenarios;
mod occurrence_cases;
