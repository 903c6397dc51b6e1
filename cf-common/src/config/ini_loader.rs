use std::{any::type_name, fmt::Debug, fs::File, io::Read, str::FromStr};

use anyhow::{bail, Context};
use configparser::ini::Ini;

use crate::error::Error;

pub struct IniLoader {
    pub ini: Ini,
}

impl IniLoader {
    pub fn new(ini_file: &str) -> anyhow::Result<Self> {
        let mut config_str = String::new();
        File::open(ini_file)
            .with_context(|| format!("failed to open ini file: {}", ini_file))?
            .read_to_string(&mut config_str)?;
        Self::from_content(&config_str)
    }

    pub fn from_content(config_str: &str) -> anyhow::Result<Self> {
        let mut ini = Ini::new();
        if let Err(e) = ini.read(config_str.to_string()) {
            bail! {Error::ConfigError(format!("failed to read content as ini: {}", e))}
        }
        Ok(Self { ini })
    }

    pub fn get_required<T>(&self, section: &str, key: &str) -> anyhow::Result<T>
    where
        T: FromStr,
    {
        if let Some(value) = self.ini.get(section, key) {
            if !value.is_empty() {
                return Self::parse_value(section, key, &value);
            }
        }
        bail! {Error::ConfigError(format!(
            "config [{}].{} does not exist or is empty",
            section, key
        ))}
    }

    pub fn get_optional<T>(&self, section: &str, key: &str) -> anyhow::Result<T>
    where
        T: Default,
        T: FromStr,
        <T as FromStr>::Err: Debug,
    {
        self.get_with_default(section, key, T::default())
    }

    pub fn get_with_default<T>(&self, section: &str, key: &str, default: T) -> anyhow::Result<T>
    where
        T: FromStr,
        <T as FromStr>::Err: Debug,
    {
        if let Some(value) = self.ini.get(section, key) {
            if !value.is_empty() {
                return Self::parse_value(section, key, &value);
            }
        }
        Ok(default)
    }

    /// comma separated values, blanks dropped
    pub fn get_list(&self, section: &str, key: &str) -> Option<Vec<String>> {
        let value = self.ini.get(section, key)?;
        let items: Vec<String> = value
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if items.is_empty() {
            None
        } else {
            Some(items)
        }
    }

    fn parse_value<T>(section: &str, key: &str, value: &str) -> anyhow::Result<T>
    where
        T: FromStr,
    {
        match value.parse::<T>() {
            Ok(v) => Ok(v),
            Err(_) => bail! {Error::ConfigError(format!(
                "config [{}].{}={}, can not be parsed as {}",
                section,
                key,
                value,
                type_name::<T>(),
            ))},
        }
    }
}
