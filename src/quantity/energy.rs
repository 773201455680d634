quantity!(KilowattHours, suffix: " kWh", precision: 2);
