use std::{fmt, str::FromStr};
use strum_macros::EnumIter;

#[derive(thiserror::Error, Debug)]
#[error("variável desconhecida: {0:?}")]
pub struct UnknownVariable(String);

/// Sensor variables of interest
///
/// The declaration order is the statistics table order.
#[derive(EnumIter, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    Temp,
    UmidadeAr,
    USolo,
}
impl Variable {
    /// Order in which the exploratory figures lay out the variables
    pub const FIGURE_ORDER: [Variable; 3] = [Variable::UmidadeAr, Variable::Temp, Variable::USolo];

    /// CSV column name
    pub fn column(&self) -> &'static str {
        match self {
            Variable::Temp => "Temp",
            Variable::UmidadeAr => "UmidadeAr",
            Variable::USolo => "USolo",
        }
    }
    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            Variable::Temp => "Temperatura",
            Variable::UmidadeAr => "Umidade do Ar",
            Variable::USolo => "Umidade do Solo",
        }
    }
    pub fn unit(&self) -> &'static str {
        match self {
            Variable::Temp => "°C",
            Variable::UmidadeAr | Variable::USolo => "%",
        }
    }
    /// Axis label: name and unit
    pub fn label(&self) -> String {
        format!("{} ({})", self.name(), self.unit())
    }
    /// Label of the loading vector in the PCA biplot
    pub fn short_label(&self) -> &'static str {
        match self {
            Variable::Temp => "Temp",
            Variable::UmidadeAr => "Umidade",
            Variable::USolo => "USolo",
        }
    }
    /// Line color, from the category10 palette
    pub fn color(&self) -> colorous::Color {
        match self {
            Variable::Temp => colorous::CATEGORY10[3],
            Variable::UmidadeAr => colorous::CATEGORY10[0],
            Variable::USolo => colorous::CATEGORY10[2],
        }
    }
}
impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}
impl FromStr for Variable {
    type Err = UnknownVariable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Temp" => Ok(Variable::Temp),
            "UmidadeAr" => Ok(Variable::UmidadeAr),
            "USolo" => Ok(Variable::USolo),
            _ => Err(UnknownVariable(s.to_string())),
        }
    }
}
